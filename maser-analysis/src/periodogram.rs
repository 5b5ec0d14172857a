//! Lomb-Scargle periodogram for unevenly sampled series
//!
//! The series is mean-centred and each trial frequency fits a sinusoid with
//! the Scargle phase offset τ, defined by
//!
//! ```text
//! tan(2ωτ) = Σ sin(2ωt) / Σ cos(2ωt)
//! ```
//!
//! Power uses the standard normalization, the fraction of the variance
//! explained by the sinusoid, so it lies in [0, 1]. Frequencies are in
//! cycles per time unit of `times`.

use std::f64::consts::PI;

use log::debug;
use rayon::prelude::*;

use crate::error::{check_finite, check_lengths, AnalysisError, Result};

/// Below this a fit basis sum is treated as empty
const DEGENERATE_SUM: f64 = 1e-12;

/// `count` evenly spaced frequencies from `min` to `max` inclusive
pub fn frequency_grid(min: f64, max: f64, count: usize) -> Result<Vec<f64>> {
    if !(min.is_finite() && max.is_finite()) || min <= 0.0 || max <= min {
        return Err(AnalysisError::InvalidFrequencyGrid(format!(
            "need 0 < min < max, got min = {min}, max = {max}"
        )));
    }
    if count < 2 {
        return Err(AnalysisError::InvalidFrequencyGrid(format!(
            "need at least 2 frequencies, got {count}"
        )));
    }

    let step = (max - min) / (count - 1) as f64;
    Ok((0..count).map(|i| min + step * i as f64).collect())
}

/// Power at a single frequency for mean-centred `values`
fn power_at(frequency: f64, times: &[f64], centred: &[f64], variance_sum: f64) -> f64 {
    let omega = 2.0 * PI * frequency;

    let (sin2, cos2) = times.iter().fold((0.0, 0.0), |(s, c), &t| {
        let (sin, cos) = (2.0 * omega * t).sin_cos();
        (s + sin, c + cos)
    });
    let tau = sin2.atan2(cos2) / (2.0 * omega);

    let mut yc = 0.0;
    let mut ys = 0.0;
    let mut cc = 0.0;
    let mut ss = 0.0;
    for (&t, &y) in times.iter().zip(centred) {
        let (sin, cos) = (omega * (t - tau)).sin_cos();
        yc += y * cos;
        ys += y * sin;
        cc += cos * cos;
        ss += sin * sin;
    }

    let mut explained = 0.0;
    if cc > DEGENERATE_SUM {
        explained += yc * yc / cc;
    }
    if ss > DEGENERATE_SUM {
        explained += ys * ys / ss;
    }
    explained / variance_sum
}

/// Lomb-Scargle power of `values` sampled at `times`
///
/// # Arguments
/// * `times` - Sample times
/// * `values` - Sample values, same length as `times`
/// * `frequencies` - Trial frequencies, finite and positive
///
/// # Returns
/// Power in [0, 1] for every trial frequency, evaluated in parallel
pub fn lomb_scargle(times: &[f64], values: &[f64], frequencies: &[f64]) -> Result<Vec<f64>> {
    check_lengths(times.len(), values.len())?;
    if times.len() < 3 {
        return Err(AnalysisError::InsufficientData {
            needed: 3,
            got: times.len(),
        });
    }
    check_finite(times)?;
    check_finite(values)?;
    if let Some(&bad) = frequencies.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
        return Err(AnalysisError::InvalidFrequencyGrid(format!(
            "frequency {bad} is not positive and finite"
        )));
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let centred: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let variance_sum: f64 = centred.iter().map(|y| y * y).sum();
    if variance_sum <= 0.0 {
        return Err(AnalysisError::ConstantSeries);
    }

    debug!(
        "Lomb-Scargle over {} samples and {} frequencies",
        times.len(),
        frequencies.len()
    );

    Ok(frequencies
        .par_iter()
        .map(|&f| power_at(f, times, &centred, variance_sum))
        .collect())
}
