//! Stellar rotation and planetary orbital motion
//!
//! Given a time in days, [`RotatingSystem`] advances the stellar rotation
//! phase and the planet's orbital phase and produces the instantaneous
//! magnetic pole direction and planet position unit vectors. Phases are left
//! unreduced; sine and cosine take care of periodicity.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::frame::ReferenceFrame;

/// Instantaneous geometry of one time sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    /// Stellar rotation phase (radians, unreduced)
    pub rotation_phase: f64,
    /// Planet orbital phase (radians, unreduced)
    pub orbital_phase: f64,
    /// Unit vector along the northern magnetic pole
    pub magnetic_pole: Vector3<f64>,
    /// Unit vector from the star to the planet
    pub planet: Vector3<f64>,
}

/// Star with a tilted dipole and a planet on a circular orbit
#[derive(Debug, Clone, Copy)]
pub struct RotatingSystem {
    frame: ReferenceFrame,
    /// Stellar rotation period (days)
    rotation_period: f64,
    /// Planet orbital period (days)
    orbital_period: f64,
    /// Rotation phase at t = 0 (cycles)
    rotation_phase0: f64,
    /// Orbital phase at t = 0 (cycles)
    orbital_phase0: f64,
    sin_obliquity: f64,
    cos_obliquity: f64,
}

impl RotatingSystem {
    /// Create a new rotating system
    ///
    /// # Arguments
    /// * `frame` - Fixed reference frame
    /// * `obliquity` - Magnetic obliquity (radians)
    /// * `rotation_period` - Stellar rotation period (days)
    /// * `rotation_phase0` - Rotation phase at t = 0 (cycles)
    /// * `orbital_period` - Planet orbital period (days)
    /// * `orbital_phase0` - Orbital phase at t = 0 (cycles)
    pub fn new(
        frame: ReferenceFrame,
        obliquity: f64,
        rotation_period: f64,
        rotation_phase0: f64,
        orbital_period: f64,
        orbital_phase0: f64,
    ) -> Self {
        let (sin_obliquity, cos_obliquity) = obliquity.sin_cos();
        Self {
            frame,
            rotation_period,
            orbital_period,
            rotation_phase0,
            orbital_phase0,
            sin_obliquity,
            cos_obliquity,
        }
    }

    /// The fixed frame the motion is expressed in
    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// Planet orbital period (days)
    pub fn orbital_period(&self) -> f64 {
        self.orbital_period
    }

    /// Geometry at `time_days`
    pub fn state_at(&self, time_days: f64) -> KinematicState {
        let rotation_phase = 2.0 * PI * (self.rotation_phase0 + time_days / self.rotation_period);
        let orbital_phase = 2.0 * PI * (self.orbital_phase0 + time_days / self.orbital_period);

        let frame = &self.frame;

        // Rotating stellar equatorial axis, then tilt the dipole away from the spin axis
        let stellar_x = rotation_phase.cos() * frame.spin_normal + rotation_phase.sin() * frame.y;
        let magnetic_pole = self.sin_obliquity * stellar_x + self.cos_obliquity * frame.spin_axis;

        let planet =
            orbital_phase.sin() * frame.orbit_y + orbital_phase.cos() * frame.orbit_normal;

        KinematicState {
            rotation_phase,
            orbital_phase,
            magnetic_pole,
            planet,
        }
    }
}
