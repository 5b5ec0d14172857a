//! Fraction of time a hemisphere is visible

use serde::{Deserialize, Serialize};

/// Visible sample count and fraction of a visibility series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DutyCycle {
    pub visible: usize,
    pub total: usize,
    /// `visible / total`, zero for an empty series
    pub fraction: f64,
}

impl DutyCycle {
    pub fn from_series(visibility: &[bool]) -> Self {
        let visible = visibility.iter().filter(|&&v| v).count();
        let total = visibility.len();
        let fraction = if total == 0 {
            0.0
        } else {
            visible as f64 / total as f64
        };
        Self {
            visible,
            total,
            fraction,
        }
    }
}

impl std::fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} samples ({:.3}%)",
            self.visible,
            self.total,
            100.0 * self.fraction
        )
    }
}
