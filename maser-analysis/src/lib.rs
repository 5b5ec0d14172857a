//! Light-curve analysis for maser visibility series
//!
//! Works on plain time and visibility slices so it can be fed from any of
//! the visibility evaluators or from observed data:
//!
//! - **Events**: contiguous visible runs and their centres and durations
//! - **Timing**: spacing between events and observed-minus-calculated residuals
//! - **Periodogram**: Lomb-Scargle power over a frequency grid
//! - **Peaks**: local maxima ranked by topographic prominence

pub mod duty_cycle;
pub mod error;
pub mod events;
pub mod peaks;
pub mod periodogram;
pub mod timing;

pub use duty_cycle::DutyCycle;
pub use error::{AnalysisError, Result};
pub use events::{events, Event};
pub use peaks::{
    find_peaks, top_peaks, Peak, TopPeaks, DEFAULT_MIN_PROMINENCE, DEFAULT_PEAK_COUNT,
};
pub use periodogram::{frequency_grid, lomb_scargle};
pub use timing::{group_events, observed_minus_calculated, EventGap};
