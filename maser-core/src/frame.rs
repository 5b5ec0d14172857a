//! Time-independent reference frames for the star-planet geometry
//!
//! The observer frame has its x-axis pointing at the observer, the y-axis
//! in the plane of the sky and the z-axis completing a right-handed set.
//! The stellar spin axis is tilted from z toward x by the complement of the
//! stellar inclination; the planet's orbit is described in a plane-of-sky
//! pair rotated about the line of sight by the projected spin-orbit angle.
//!
//! Everything here depends only on fixed angles, so a [`ReferenceFrame`] is
//! built once per model and shared by every time sample.

use nalgebra::Vector3;

/// Fixed basis vectors used by the kinematics of every sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    /// Line-of-sight axis, pointing at the observer
    pub x: Vector3<f64>,
    /// Plane-of-sky axis
    pub y: Vector3<f64>,
    /// Plane-of-sky axis completing the right-handed set
    pub z: Vector3<f64>,
    /// Stellar rotation axis
    pub spin_axis: Vector3<f64>,
    /// Unit vector in the x-z plane perpendicular to the rotation axis
    pub spin_normal: Vector3<f64>,
    /// Plane-of-sky y-axis rotated by the spin-orbit angle
    pub orbit_y: Vector3<f64>,
    /// Plane-of-sky z-axis rotated by the spin-orbit angle
    pub orbit_z: Vector3<f64>,
    /// In-orbit direction perpendicular to `orbit_y`
    pub orbit_normal: Vector3<f64>,
}

impl ReferenceFrame {
    /// Build the frame from fixed angles
    ///
    /// # Arguments
    /// * `stellar_inclination` - Spin axis inclination to the line of sight (radians)
    /// * `spin_orbit_angle` - Projected spin-orbit angle (radians)
    /// * `orbital_inclination` - Orbital axis inclination to the line of sight (radians)
    pub fn new(stellar_inclination: f64, spin_orbit_angle: f64, orbital_inclination: f64) -> Self {
        let x = Vector3::x();
        let y = Vector3::y();
        let z = Vector3::z();

        let (sin_i_s, cos_i_s) = stellar_inclination.sin_cos();
        let (sin_lam, cos_lam) = spin_orbit_angle.sin_cos();
        let (sin_i_p, cos_i_p) = orbital_inclination.sin_cos();

        // Stellar spin frame
        let spin_axis = cos_i_s * x + sin_i_s * z;
        let spin_normal = sin_i_s * x - cos_i_s * z;

        // Orbital plane-of-sky pair
        let orbit_y = cos_lam * y - sin_lam * z;
        let orbit_z = sin_lam * y + cos_lam * z;
        let orbit_normal = sin_i_p * x - cos_i_p * orbit_z;

        Self {
            x,
            y,
            z,
            spin_axis,
            spin_normal,
            orbit_y,
            orbit_z,
            orbit_normal,
        }
    }

    /// Direction of the observer
    pub fn line_of_sight(&self) -> &Vector3<f64> {
        &self.x
    }
}
