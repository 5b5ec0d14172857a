//! Event timing: spacing between events and O−C residuals

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Interval between two consecutive event centres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventGap {
    /// Halfway between the two centres
    pub midpoint: f64,
    /// Time from one centre to the next
    pub spacing: f64,
}

/// Spacing of consecutive event centres
///
/// Returns one gap per adjacent pair, so one fewer than the number of centres.
pub fn group_events(centres: &[f64]) -> Vec<EventGap> {
    centres
        .windows(2)
        .map(|pair| {
            let spacing = pair[1] - pair[0];
            EventGap {
                midpoint: pair[0] + spacing / 2.0,
                spacing,
            }
        })
        .collect()
}

/// Observed-minus-calculated residuals against a constant-period ephemeris
///
/// The ephemeris starts at the first centre and advances by the mean
/// spacing: `predicted_k = c₀ + k·mean(Δc)`.
///
/// # Returns
/// `c_k − predicted_k` per centre, or `InsufficientData` for fewer than two centres
pub fn observed_minus_calculated(centres: &[f64]) -> Result<Vec<f64>> {
    if centres.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: centres.len(),
        });
    }

    let first = centres[0];
    let last = centres[centres.len() - 1];
    // Mean of the differences telescopes to the end-to-end span
    let mean_spacing = (last - first) / (centres.len() - 1) as f64;

    Ok(centres
        .iter()
        .enumerate()
        .map(|(k, &c)| c - (first + mean_spacing * k as f64))
        .collect())
}
