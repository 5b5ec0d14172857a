//! Emission radius along a dipole field line
//!
//! Along a shell of parameter L the dipole field magnitude at radius r
//! (stellar radii) is
//!
//! ```text
//! B(r) = B_s · r⁻³ · sqrt(1 − 0.75·r/L)
//! ```
//!
//! Emission at frequency f comes from where B(r) = f / 2.8. The root is
//! found by Newton-Raphson on the polynomial form
//! `F(r) = (B_f/B_s)²·r⁶ + 0.75·r/L − 1`, seeded at the stellar surface.
//! Iteration stops once the relative field mismatch `|1 − B(r)/B_f|` is
//! within tolerance, or after `max_iterations` steps.
//!
//! The step and residual functions are public so the masked batch
//! evaluator can apply exactly the same arithmetic lane by lane.

use serde::{Deserialize, Serialize};

use crate::constants::{CYCLOTRON_MHZ_PER_GAUSS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Newton-Raphson settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Allowed relative mismatch between B(r) and the target field
    pub tolerance: f64,
    /// Maximum number of Newton steps per sample
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Result of an emission radius solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    /// Final radius (stellar radii)
    pub radius: f64,
    /// Relative field mismatch at `radius`
    pub residual: f64,
    /// Newton steps taken
    pub iterations: usize,
    /// Whether the residual met the tolerance
    pub converged: bool,
}

impl SolverOutcome {
    /// Whether the radius can be used for the cone geometry
    ///
    /// Requires convergence and a radius on the field line, 0 < r ≤ L.
    pub fn accepted(&self, shell: f64) -> bool {
        is_accepted(self.radius, self.residual, shell, self.converged)
    }
}

/// Field strength equivalent to an observing frequency (Gauss)
pub fn target_field(frequency: f64) -> f64 {
    frequency / CYCLOTRON_MHZ_PER_GAUSS
}

/// Dipole field magnitude at `radius` on shell `shell` (Gauss)
pub fn field_strength(polar_field: f64, shell: f64, radius: f64) -> f64 {
    polar_field * radius.powi(-3) * (1.0 - 0.75 * radius / shell).sqrt()
}

/// Relative mismatch |1 − B/B_f|
pub fn residual(field: f64, target: f64) -> f64 {
    (1.0 - field / target).abs()
}

/// Convergence test; a NaN residual never converges
pub fn is_converged(residual: f64, tolerance: f64) -> bool {
    residual <= tolerance
}

/// Whether a solved radius is usable: converged, finite and on the field line
pub fn is_accepted(radius: f64, residual: f64, shell: f64, converged: bool) -> bool {
    converged && residual.is_finite() && radius > 0.0 && radius <= shell
}

/// One Newton-Raphson update of the radius
///
/// `ratio_sq` is (B_f/B_s)².
pub fn newton_step(radius: f64, ratio_sq: f64, shell: f64) -> f64 {
    let f = ratio_sq * radius.powi(6) + 0.75 * radius / shell - 1.0;
    let df = 6.0 * ratio_sq * radius.powi(5) + 0.75 / shell;
    radius - f / df
}

/// Solve for the radius where the field matches `target`
///
/// # Arguments
/// * `target` - Field strength to match (Gauss)
/// * `polar_field` - Polar dipole field strength (Gauss)
/// * `shell` - Dipole shell parameter (stellar radii)
/// * `config` - Tolerance and iteration cap
pub fn solve_emission_radius(
    target: f64,
    polar_field: f64,
    shell: f64,
    config: &SolverConfig,
) -> SolverOutcome {
    let ratio_sq = (target / polar_field).powi(2);

    let mut radius = 1.0;
    let mut mismatch = residual(field_strength(polar_field, shell, radius), target);
    let mut iterations = 0;

    while !is_converged(mismatch, config.tolerance) && iterations < config.max_iterations {
        radius = newton_step(radius, ratio_sq, shell);
        mismatch = residual(field_strength(polar_field, shell, radius), target);
        iterations += 1;
    }

    SolverOutcome {
        radius,
        residual: mismatch,
        iterations,
        converged: is_converged(mismatch, config.tolerance),
    }
}
