//! Visibility model for planet-induced stellar cyclotron maser emission
//!
//! A magnetized planet on a circular orbit around a star with a tilted
//! dipole field drives electron cyclotron maser emission along the stellar
//! field line it sits on. This crate decides, sample by sample, whether the
//! northern and southern emission cones point at a distant observer.
//!
//! Three evaluators produce the same visibility sequences:
//! - [`MaserModel::evaluate`] runs one sample at a time with early exits
//! - [`parallel::evaluate_par`] splits the samples across the rayon pool
//! - [`masked::evaluate_masked`] runs every stage over whole arrays with 0/1 masks

pub mod constants;
pub mod field_line;
pub mod frame;
pub mod kepler;
pub mod kinematics;
pub mod masked;
pub mod model;
pub mod parallel;
pub mod params;
pub mod solver;
pub mod visibility;

// Re-exports for easier access
pub use constants::PhysicalConstants;
pub use field_line::FieldLine;
pub use frame::ReferenceFrame;
pub use kinematics::{KinematicState, RotatingSystem};
pub use masked::{evaluate_masked, MaskedVisibility};
pub use model::{maser, MaserModel, SampleStage, SampleTrace, SampleVisibility, Visibility};
pub use parallel::{evaluate_ensemble, evaluate_par};
pub use params::{ModelConfig, ParamError, SystemParams};
pub use solver::{SolverConfig, SolverOutcome};
pub use visibility::{BeamOutcome, ConeWindow, Hemisphere};
