use thiserror::Error;

/// Errors that can occur while analysing a light curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Input lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f64 },

    #[error("Series has zero variance")]
    ConstantSeries,

    #[error("Invalid frequency grid: {0}")]
    InvalidFrequencyGrid(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Fail with `LengthMismatch` unless both lengths agree
pub(crate) fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(AnalysisError::LengthMismatch { left, right });
    }
    Ok(())
}

/// Fail with `NonFinite` on the first NaN or infinite value
pub(crate) fn check_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::NonFinite {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
