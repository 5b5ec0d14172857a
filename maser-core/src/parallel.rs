//! Multi-threaded evaluation over time samples and parameter sets
//!
//! Samples are independent, so the time series is split into contiguous
//! chunks evaluated on the rayon pool. Results are concatenated in chunk
//! order and are identical to [`MaserModel::evaluate`].

use log::debug;
use rayon::prelude::*;

use crate::model::{MaserModel, SampleVisibility, Visibility};
use crate::params::SystemParams;

/// Default number of time samples per rayon task
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Evaluate visibility over `times` on the rayon thread pool
///
/// # Arguments
/// * `model` - Model to evaluate
/// * `times` - Sample times (days)
/// * `chunk_size` - Optional samples per task. Defaults to [`DEFAULT_CHUNK_SIZE`] if None.
///
/// # Returns
/// Visibility in the same order as `times`
pub fn evaluate_par(model: &MaserModel, times: &[f64], chunk_size: Option<usize>) -> Visibility {
    if !model.emission_possible() {
        return Visibility::hidden(times.len());
    }

    let chunk_size = chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE).max(1);
    debug!(
        "Evaluating {} samples in chunks of {chunk_size}",
        times.len()
    );

    let chunks: Vec<Vec<SampleVisibility>> = times
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .map(|&t| model.trace_sample(t).visibility())
                .collect()
        })
        .collect();

    chunks.into_iter().flatten().collect()
}

/// Evaluate many parameter sets over the same time grid, one rayon task per set
///
/// Each set is evaluated sequentially within its task.
pub fn evaluate_ensemble(params: &[SystemParams], times: &[f64]) -> Vec<Visibility> {
    params
        .par_iter()
        .map(|p| MaserModel::with_defaults(*p).evaluate(times))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::Hemisphere;

    fn web_defaults() -> SystemParams {
        SystemParams::from_array([
            0.2, 0.3, 0.8, 67.0, 1000.0, 34.0, 0.1, 5.0, 56.0, 23.0, 0.6, 100.0, 75.0, 5.0,
        ])
    }

    fn grid(n: usize) -> Vec<f64> {
        (0..n).map(|i| 0.001 * i as f64).collect()
    }

    #[test]
    fn test_matches_sequential_for_any_chunking() {
        let model = MaserModel::with_defaults(web_defaults());
        let times = grid(5000);
        let expected = model.evaluate(&times);

        for chunk_size in [None, Some(1), Some(7), Some(4096), Some(100_000)] {
            assert_eq!(evaluate_par(&model, &times, chunk_size), expected);
        }
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let model = MaserModel::with_defaults(web_defaults());
        let times = grid(50);
        assert_eq!(evaluate_par(&model, &times, Some(0)), model.evaluate(&times));
    }

    #[test]
    fn test_empty_series() {
        let model = MaserModel::with_defaults(web_defaults());
        assert!(evaluate_par(&model, &[], None).is_empty());
    }

    #[test]
    fn test_ensemble_preserves_order() {
        let base = web_defaults();
        let mut silent = base;
        silent.frequency = 1.0e6;

        let times = grid(1000);
        let results = evaluate_ensemble(&[base, silent, base], &times);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], results[2]);
        assert_eq!(results[1].count(Hemisphere::North), 0);
        assert_eq!(results[1].count(Hemisphere::South), 0);
        assert_eq!(results[0], MaserModel::with_defaults(base).evaluate(&times));
    }
}
