//! System parameters and model configuration
//!
//! [`SystemParams`] is the fixed 14-value positional parameter set describing
//! the star, the planet's orbit and the emission cone. Angles are stored in
//! degrees exactly as supplied; the model converts them to radians once when
//! it is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CYCLOTRON_MHZ_PER_GAUSS, DEFAULT_L_MAX, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::solver::SolverConfig;

/// Number of physical parameters in the positional parameter set
pub const PARAM_COUNT: usize = 14;

/// Names of the parameters in positional order
pub const PARAM_NAMES: [&str; PARAM_COUNT] = [
    "stellar_mass",
    "stellar_radius",
    "rotation_period",
    "stellar_inclination",
    "polar_field",
    "obliquity",
    "rotation_phase",
    "orbital_distance",
    "orbital_inclination",
    "spin_orbit_angle",
    "orbital_phase",
    "frequency",
    "cone_opening",
    "cone_thickness",
];

/// Errors reported by [`SystemParams::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Parameter {name} is not finite: {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Parameter {name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Parameter {name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Physical description of a star-planet system and the emission cone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// Stellar mass (solar masses)
    pub stellar_mass: f64,
    /// Stellar radius (solar radii)
    pub stellar_radius: f64,
    /// Stellar rotation period (days)
    pub rotation_period: f64,
    /// Inclination of the stellar spin axis to the line of sight (degrees)
    pub stellar_inclination: f64,
    /// Dipole field strength at the magnetic poles (Gauss)
    pub polar_field: f64,
    /// Angle between the magnetic and rotation axes (degrees)
    pub obliquity: f64,
    /// Stellar rotation phase at t = 0 (cycles)
    pub rotation_phase: f64,
    /// Orbital distance of the planet (stellar radii)
    pub orbital_distance: f64,
    /// Inclination of the orbital axis to the line of sight (degrees)
    pub orbital_inclination: f64,
    /// Projected spin-orbit angle (degrees)
    pub spin_orbit_angle: f64,
    /// Planet orbital phase at t = 0 (cycles)
    pub orbital_phase: f64,
    /// Observing frequency (MHz)
    pub frequency: f64,
    /// Emission cone opening angle (degrees)
    pub cone_opening: f64,
    /// Emission cone thickness (degrees)
    pub cone_thickness: f64,
}

impl SystemParams {
    /// Build from the positional parameter order listed in [`PARAM_NAMES`]
    pub fn from_array(values: [f64; PARAM_COUNT]) -> Self {
        let [
            stellar_mass,
            stellar_radius,
            rotation_period,
            stellar_inclination,
            polar_field,
            obliquity,
            rotation_phase,
            orbital_distance,
            orbital_inclination,
            spin_orbit_angle,
            orbital_phase,
            frequency,
            cone_opening,
            cone_thickness,
        ] = values;
        Self {
            stellar_mass,
            stellar_radius,
            rotation_period,
            stellar_inclination,
            polar_field,
            obliquity,
            rotation_phase,
            orbital_distance,
            orbital_inclination,
            spin_orbit_angle,
            orbital_phase,
            frequency,
            cone_opening,
            cone_thickness,
        }
    }

    /// Parameters in positional order
    pub fn to_array(&self) -> [f64; PARAM_COUNT] {
        [
            self.stellar_mass,
            self.stellar_radius,
            self.rotation_period,
            self.stellar_inclination,
            self.polar_field,
            self.obliquity,
            self.rotation_phase,
            self.orbital_distance,
            self.orbital_inclination,
            self.spin_orbit_angle,
            self.orbital_phase,
            self.frequency,
            self.cone_opening,
            self.cone_thickness,
        ]
    }

    /// Highest frequency the star can emit anywhere: the polar cyclotron frequency (MHz)
    pub fn max_frequency(&self) -> f64 {
        CYCLOTRON_MHZ_PER_GAUSS * self.polar_field
    }

    /// Whether the observing frequency is below the polar cyclotron frequency
    ///
    /// When this is false no sample can ever be visible and evaluation
    /// short-circuits before any geometry is built.
    pub fn emission_possible(&self) -> bool {
        !(self.frequency > self.max_frequency())
    }

    /// Check the parameter contract.
    ///
    /// The model does not call this; it is offered to callers that want to
    /// reject obviously unphysical inputs before evaluation. Every value must
    /// be finite; mass, radius, rotation period, orbital distance and
    /// frequency must be positive; the cone thickness must not be negative.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, value) in PARAM_NAMES.into_iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { name, value });
            }
        }

        let positive = [
            ("stellar_mass", self.stellar_mass),
            ("stellar_radius", self.stellar_radius),
            ("rotation_period", self.rotation_period),
            ("orbital_distance", self.orbital_distance),
            ("frequency", self.frequency),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ParamError::NotPositive { name, value });
            }
        }

        if self.cone_thickness < 0.0 {
            return Err(ParamError::Negative {
                name: "cone_thickness",
                value: self.cone_thickness,
            });
        }

        Ok(())
    }
}

/// Tunables of the emission model that are not physical parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Largest field-line shell treated as closed (stellar radii)
    pub l_max: f64,
    /// Emission radius solver settings
    pub solver: SolverConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            l_max: DEFAULT_L_MAX,
            solver: SolverConfig {
                tolerance: DEFAULT_TOLERANCE,
                max_iterations: DEFAULT_MAX_ITERATIONS,
            },
        }
    }
}
