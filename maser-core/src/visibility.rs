//! Emission cone geometry and the line-of-sight test
//!
//! Cyclotron maser emission is beamed into a thin hollow cone about the
//! local field direction at the emission point. The cone axis is expressed
//! in the (magnetic equator, magnetic pole) basis of the planet's field line
//! and mirrored between hemispheres. A hemisphere is visible when the angle
//! between its cone axis and the line of sight falls inside the cone wall.

use nalgebra::Vector3;

/// Magnetic hemisphere of the star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Both hemispheres, North first
    pub const ALL: [Hemisphere; 2] = [Hemisphere::North, Hemisphere::South];

    /// Sign of the polar component of the cone axis
    fn polar_sign(self) -> f64 {
        match self {
            Hemisphere::North => 1.0,
            Hemisphere::South => -1.0,
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north"),
            Hemisphere::South => write!(f, "south"),
        }
    }
}

/// Cone-axis components along the magnetic equator and pole
///
/// Shared by both hemispheres; the polar component flips sign for the South.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeCoefficients {
    /// Component along the magnetic-equator vector
    pub c_x: f64,
    /// Component along the magnetic pole (Northern hemisphere)
    pub c_z: f64,
}

/// Cone-axis components for emission at `radius` on shell `shell`
///
/// The emission point latitude follows sin²θ_f = r/L; the field direction
/// there gives c_x = 3·sinθ·cosθ / sqrt(1 + 3cos²θ) and
/// c_z = (3cos²θ − 1) / sqrt(1 + 3cos²θ).
pub fn cone_coefficients(radius: f64, shell: f64) -> ConeCoefficients {
    let sin_theta = (radius / shell).sqrt();
    let cos_theta = (1.0 - sin_theta.powi(2)).max(0.0).sqrt();

    let cos_sq = cos_theta.powi(2);
    let norm = (1.0 + 3.0 * cos_sq).sqrt();

    ConeCoefficients {
        c_x: 3.0 * sin_theta * cos_theta / norm,
        c_z: (3.0 * cos_sq - 1.0) / norm,
    }
}

/// Whether `hemisphere` emits toward the observer for this sample
///
/// The hemisphere on the planet's side of the magnetic equator emits when
/// the observing frequency is above the planet's local frequency; the
/// opposite hemisphere emits when the field line is closed (L < l_max).
pub fn hemisphere_active(
    hemisphere: Hemisphere,
    cos_theta: f64,
    frequency: f64,
    f_planet: f64,
    shell: f64,
    l_max: f64,
) -> bool {
    let (planet_side, far_side) = match hemisphere {
        Hemisphere::North => (cos_theta >= 0.0, cos_theta < 0.0),
        Hemisphere::South => (cos_theta < 0.0, cos_theta >= 0.0),
    };

    (planet_side && frequency > f_planet) || (far_side && shell < l_max)
}

/// Cone axis of `hemisphere` in the observer frame
pub fn cone_axis(
    hemisphere: Hemisphere,
    coefficients: &ConeCoefficients,
    equator: &Vector3<f64>,
    magnetic_pole: &Vector3<f64>,
) -> Vector3<f64> {
    coefficients.c_x * equator + hemisphere.polar_sign() * coefficients.c_z * magnetic_pole
}

/// Angle between a cone axis and the line of sight (radians)
///
/// The cosine is clamped to [-1, 1] against rounding overshoot.
pub fn beam_angle(axis: &Vector3<f64>, line_of_sight: &Vector3<f64>) -> f64 {
    axis.dot(line_of_sight).clamp(-1.0, 1.0).acos()
}

/// Angular window of the hollow emission cone wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeWindow {
    /// Cone opening angle (radians)
    pub opening: f64,
    /// Cone wall thickness (radians)
    pub thickness: f64,
}

impl ConeWindow {
    /// Create a window from angles in radians
    pub fn new(opening: f64, thickness: f64) -> Self {
        Self { opening, thickness }
    }

    /// Strict open-interval test α − δα/2 < γ < α + δα/2
    pub fn contains(&self, gamma: f64) -> bool {
        let half = self.thickness / 2.0;
        self.opening - half < gamma && gamma < self.opening + half
    }
}

/// Per-hemisphere result of the cone test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamOutcome {
    /// Whether the hemisphere's activation rule held
    pub active: bool,
    /// Angle between cone axis and line of sight, when the hemisphere was active
    pub gamma: Option<f64>,
    /// Whether emission reaches the observer
    pub visible: bool,
}

impl BeamOutcome {
    /// Outcome of a hemisphere that was never tested
    pub const HIDDEN: BeamOutcome = BeamOutcome {
        active: false,
        gamma: None,
        visible: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_equatorial_emission_points_along_pole() {
        // At the magnetic equator (r = L) the field runs parallel to the axis
        let c = cone_coefficients(10.0, 10.0);
        assert_relative_eq!(c.c_x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.c_z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_emission_points_along_pole() {
        let c = cone_coefficients(0.0, 10.0);
        assert_relative_eq!(c.c_x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.c_z, 1.0, epsilon = 1e-12);

        // Unbounded shell behaves like the pole
        let c = cone_coefficients(3.0, f64::INFINITY);
        assert_relative_eq!(c.c_x, 0.0);
        assert_relative_eq!(c.c_z, 1.0);
    }

    #[test]
    fn test_cone_axis_is_unit() {
        let mut rng = StdRng::seed_from_u64(99);
        let pole = Vector3::z();
        let equator = Vector3::x();

        for _ in 0..100 {
            let shell = rng.gen_range(1.0..100.0);
            let radius = rng.gen_range(0.0..shell);
            let c = cone_coefficients(radius, shell);
            for hemisphere in Hemisphere::ALL {
                let axis = cone_axis(hemisphere, &c, &equator, &pole);
                assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_hemispheres_mirror_in_pole() {
        let c = cone_coefficients(2.0, 8.0);
        let north = cone_axis(Hemisphere::North, &c, &Vector3::x(), &Vector3::z());
        let south = cone_axis(Hemisphere::South, &c, &Vector3::x(), &Vector3::z());
        assert_relative_eq!(north.x, south.x);
        assert_relative_eq!(north.z, -south.z);
    }

    #[test]
    fn test_activation_swaps_with_colatitude_sign() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let cos_theta = rng.gen_range(-1.0..1.0);
            if cos_theta == 0.0 {
                continue;
            }
            let f = rng.gen_range(1.0..100.0);
            let f_planet = rng.gen_range(1.0..100.0);
            let shell = rng.gen_range(1.0..200.0);

            let north = hemisphere_active(Hemisphere::North, cos_theta, f, f_planet, shell, 100.0);
            let south_flipped =
                hemisphere_active(Hemisphere::South, -cos_theta, f, f_planet, shell, 100.0);
            assert_eq!(north, south_flipped);
        }
    }

    #[test]
    fn test_neither_hemisphere_active() {
        // Planet frequency above f on an open line
        for cos_theta in [-0.5, 0.5] {
            for hemisphere in Hemisphere::ALL {
                assert!(!hemisphere_active(hemisphere, cos_theta, 10.0, 20.0, 150.0, 100.0));
            }
        }
    }

    #[test]
    fn test_beam_angle_clamps() {
        let axis = Vector3::new(1.0 + 1e-15, 0.0, 0.0);
        assert_eq!(beam_angle(&axis, &Vector3::x()), 0.0);
        assert_relative_eq!(beam_angle(&Vector3::z(), &Vector3::x()), FRAC_PI_2);
        assert_relative_eq!(beam_angle(&-Vector3::x(), &Vector3::x()), PI);
    }

    #[test]
    fn test_window_is_open_interval() {
        let window = ConeWindow::new(1.0, 0.2);
        assert!(window.contains(1.0));
        assert!(window.contains(0.95));
        assert!(!window.contains(0.8));
        assert!(!window.contains(1.2));
        assert!(!window.contains(f64::NAN));

        let closed = ConeWindow::new(1.0, 0.0);
        assert!(!closed.contains(1.0));
    }
}
