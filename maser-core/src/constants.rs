//! Physical constants and emission-model defaults
//!
//! Values are CGS, the unit system the Kepler and dipole formulas are
//! written in. Constants are bundled into an immutable [`PhysicalConstants`]
//! value that is handed to the model and the Kepler helpers rather than read
//! from process-wide state, so alternative constant sets can be swapped in
//! for comparisons against other codes.

use serde::{Deserialize, Serialize};

/// Electron cyclotron frequency per unit field strength (MHz per Gauss)
pub const CYCLOTRON_MHZ_PER_GAUSS: f64 = 2.8;

/// Largest field-line shell considered closed (stellar radii)
pub const DEFAULT_L_MAX: f64 = 100.0;

/// Relative field-strength tolerance for the emission radius solver
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Hard cap on Newton iterations per sample
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Physical constants used to convert between orbital distance and period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Solar mass in grams
    pub solar_mass: f64,
    /// Solar radius in centimeters
    pub solar_radius: f64,
    /// Gravitational constant in cm³ g⁻¹ s⁻²
    pub gravitational_constant: f64,
    /// Seconds per day
    pub seconds_per_day: f64,
}

impl PhysicalConstants {
    /// The constant set the published visibility results were computed with
    pub const CGS: PhysicalConstants = PhysicalConstants {
        solar_mass: 1.989e33,
        solar_radius: 6.955e10,
        gravitational_constant: 6.674e-8,
        seconds_per_day: 86400.0,
    };
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CGS
    }
}
