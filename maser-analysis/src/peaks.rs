//! Peak detection by topographic prominence
//!
//! A peak is a sample higher than both neighbours; a flat top counts once,
//! at its middle sample. Its prominence is the height above the higher of
//! the two lowest points reached before climbing to higher ground on either
//! side (or reaching the series edge).

use serde::{Deserialize, Serialize};

use crate::error::{check_lengths, Result};

/// Default minimum prominence for periodogram peaks
pub const DEFAULT_MIN_PROMINENCE: f64 = 0.02;

/// Default number of peaks reported
pub const DEFAULT_PEAK_COUNT: usize = 3;

/// A local maximum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub index: usize,
    pub prominence: f64,
}

/// Most prominent peaks, zero-padded to a fixed count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPeaks {
    /// Abscissa of each peak, most prominent first
    pub positions: Vec<f64>,
    pub prominences: Vec<f64>,
}

/// Indices of local maxima, flat tops reported at their middle
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    let n = values.len();
    let mut i = 1;

    while i + 1 < n {
        if values[i - 1] < values[i] {
            // Walk over a possible plateau
            let mut ahead = i + 1;
            while ahead + 1 < n && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    maxima
}

/// Prominence of the peak at `peak`
fn prominence(values: &[f64], peak: usize) -> f64 {
    let height = values[peak];

    let left_base = values[..peak]
        .iter()
        .rev()
        .take_while(|&&v| v <= height)
        .fold(height, |low, &v| low.min(v));

    let right_base = values[peak + 1..]
        .iter()
        .take_while(|&&v| v <= height)
        .fold(height, |low, &v| low.min(v));

    height - left_base.max(right_base)
}

/// Local maxima with at least `min_prominence`, in index order
pub fn find_peaks(values: &[f64], min_prominence: f64) -> Vec<Peak> {
    local_maxima(values)
        .into_iter()
        .map(|index| Peak {
            index,
            prominence: prominence(values, index),
        })
        .filter(|peak| peak.prominence >= min_prominence)
        .collect()
}

/// The `count` most prominent peaks of `values` against `positions`
///
/// Missing peaks are filled with zeros so both vectors always have `count`
/// entries.
///
/// # Arguments
/// * `positions` - Abscissa of each sample, such as periodogram frequencies
/// * `values` - Series to search, same length as `positions`
/// * `min_prominence` - Smallest prominence reported
/// * `count` - Number of peaks to report
pub fn top_peaks(
    positions: &[f64],
    values: &[f64],
    min_prominence: f64,
    count: usize,
) -> Result<TopPeaks> {
    check_lengths(positions.len(), values.len())?;

    let mut peaks = find_peaks(values, min_prominence);
    peaks.sort_by(|a, b| b.prominence.total_cmp(&a.prominence));
    peaks.truncate(count);

    let mut top = TopPeaks {
        positions: peaks.iter().map(|p| positions[p.index]).collect(),
        prominences: peaks.iter().map(|p| p.prominence).collect(),
    };
    top.positions.resize(count, 0.0);
    top.prominences.resize(count, 0.0);

    Ok(top)
}
