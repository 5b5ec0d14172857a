//! Emission events in a visibility series
//!
//! An event is a run of consecutive visible samples that both starts and
//! ends inside the series. Runs already under way at the first sample or
//! still going at the last sample have unknown extent and are dropped.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check_lengths, Result};

/// One complete visible run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Time of the first visible sample
    pub start: f64,
    /// Time of the last visible sample
    pub end: f64,
    /// Midpoint of the run
    pub centre: f64,
    /// `end - start`; zero for a single-sample run
    pub duration: f64,
}

impl Event {
    fn new(start: f64, end: f64) -> Self {
        let duration = end - start;
        Self {
            start,
            end,
            centre: start + duration / 2.0,
            duration,
        }
    }
}

/// Find all complete visible runs
///
/// # Arguments
/// * `times` - Sample times, ascending
/// * `visibility` - Visibility flag per sample
///
/// # Returns
/// Events in time order, or `LengthMismatch` when the slices differ in length
pub fn events(times: &[f64], visibility: &[bool]) -> Result<Vec<Event>> {
    check_lengths(times.len(), visibility.len())?;

    let mut found = Vec::new();
    let mut rise: Option<usize> = None;

    for i in 1..visibility.len() {
        match (visibility[i - 1], visibility[i]) {
            (false, true) => rise = Some(i),
            (true, false) => {
                if let Some(start) = rise.take() {
                    found.push(Event::new(times[start], times[i - 1]));
                }
            }
            _ => {}
        }
    }

    debug!(
        "Found {} complete events in {} samples",
        found.len(),
        visibility.len()
    );
    Ok(found)
}
