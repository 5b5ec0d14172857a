//! Locating the planet on a stellar dipole field line
//!
//! The planet sits on the dipole field line whose shell parameter L (the
//! distance at which the line crosses the magnetic equator) follows from
//! the planet's magnetic colatitude: r = L·sin²θ. The shell fixes which
//! frequencies can be emitted along the line and where on it the emission
//! originates.
//!
//! A planet exactly on the magnetic axis has no finite shell. That case is
//! represented by `L = ∞` with a zero magnetic-equator vector; IEEE
//! arithmetic then keeps every derived quantity finite.

use nalgebra::Vector3;

use crate::constants::CYCLOTRON_MHZ_PER_GAUSS;

/// Where the planet sits in the stellar dipole and which frequencies its field line supports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLine {
    /// Dipole shell parameter L (stellar radii), infinite on the magnetic axis
    pub shell: f64,
    /// Cosine of the planet's magnetic colatitude
    pub cos_theta: f64,
    /// Sine of the planet's magnetic colatitude, never negative
    pub sin_theta: f64,
    /// Lowest frequency on the field line, at the stellar surface (MHz)
    pub f_min: f64,
    /// Highest frequency on the field line (MHz)
    pub f_max: f64,
    /// Frequency at the planet's own position (MHz)
    pub f_planet: f64,
    /// Unit vector toward the planet perpendicular to the magnetic axis
    pub equator: Vector3<f64>,
    /// Whether the observing frequency can be emitted from this field line
    pub reachable: bool,
}

/// Shell parameter L = a / sin²θ, infinite when the planet is on the magnetic axis
pub fn shell_parameter(orbital_distance: f64, sin_theta: f64) -> f64 {
    if sin_theta == 0.0 {
        f64::INFINITY
    } else {
        orbital_distance / sin_theta.powi(2)
    }
}

/// Magnetic-equator direction of the planet's field line
///
/// Component of the planet position perpendicular to the magnetic axis,
/// scaled to unit length. Zero on the degenerate on-axis branch.
pub fn magnetic_equator(
    planet: &Vector3<f64>,
    magnetic_pole: &Vector3<f64>,
    cos_theta: f64,
    sin_theta: f64,
) -> Vector3<f64> {
    if sin_theta == 0.0 {
        Vector3::zeros()
    } else {
        planet / sin_theta - (cos_theta / sin_theta) * magnetic_pole
    }
}

/// Reachability gate for the observing frequency on a field line
///
/// The frequency must lie inside `[f_min, f_max]`. On shells longer than
/// `l_max` the line is treated as open, and emission survives only when the
/// observing frequency is not below the planet's local frequency.
pub fn is_reachable(
    frequency: f64,
    f_min: f64,
    f_max: f64,
    f_planet: f64,
    shell: f64,
    l_max: f64,
) -> bool {
    let out_of_band = frequency > f_max || frequency < f_min;
    let open_line = shell > l_max && f_planet > frequency;
    !(out_of_band || open_line)
}

/// Locate the planet's field line and test whether `frequency` is emitted on it
///
/// # Arguments
/// * `magnetic_pole` - Unit vector along the northern magnetic pole
/// * `planet` - Unit vector toward the planet
/// * `orbital_distance` - Orbital distance (stellar radii)
/// * `polar_field` - Polar dipole field strength (Gauss)
/// * `frequency` - Observing frequency (MHz)
/// * `l_max` - Largest closed shell (stellar radii)
pub fn locate(
    magnetic_pole: &Vector3<f64>,
    planet: &Vector3<f64>,
    orbital_distance: f64,
    polar_field: f64,
    frequency: f64,
    l_max: f64,
) -> FieldLine {
    let cos_theta = planet.dot(magnetic_pole);
    let sin_theta = (1.0 - cos_theta.powi(2)).max(0.0).sqrt();

    let shell = shell_parameter(orbital_distance, sin_theta);

    let f_min = 0.5 * CYCLOTRON_MHZ_PER_GAUSS * polar_field * shell.powi(-3);
    let f_max = CYCLOTRON_MHZ_PER_GAUSS * polar_field * (1.0 - 0.75 / shell).sqrt();
    let f_planet = CYCLOTRON_MHZ_PER_GAUSS
        * polar_field
        * orbital_distance.powi(-3)
        * (1.0 - 0.75 * orbital_distance / shell).sqrt();

    let reachable = is_reachable(frequency, f_min, f_max, f_planet, shell, l_max);
    let equator = magnetic_equator(planet, magnetic_pole, cos_theta, sin_theta);

    FieldLine {
        shell,
        cos_theta,
        sin_theta,
        f_min,
        f_max,
        f_planet,
        equator,
        reachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn planet_at_colatitude(theta: f64) -> Vector3<f64> {
        Vector3::new(theta.sin(), 0.0, theta.cos())
    }

    #[test]
    fn test_equatorial_planet_shell_equals_distance() {
        let line = locate(&Vector3::z(), &Vector3::x(), 10.0, 430.0, 10.0, 100.0);
        assert_relative_eq!(line.shell, 10.0, epsilon = 1e-12);
        assert_relative_eq!(line.equator, Vector3::x(), epsilon = 1e-12);
        assert!(line.reachable);
    }

    #[test]
    fn test_shell_never_below_orbital_distance() {
        for i in 1..90 {
            let theta = (i as f64).to_radians();
            let line = locate(&Vector3::z(), &planet_at_colatitude(theta), 7.0, 500.0, 50.0, 100.0);
            assert!(line.shell >= 7.0);
            assert_relative_eq!(line.equator.norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(line.equator.dot(&Vector3::z()), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_frequency_band() {
        let line = locate(&Vector3::z(), &Vector3::x(), 4.0, 1000.0, 100.0, 100.0);
        assert_relative_eq!(line.f_min, 1.4 * 1000.0 / 64.0, epsilon = 1e-9);
        assert_relative_eq!(line.f_max, 2800.0 * (1.0 - 0.75 / 4.0_f64).sqrt(), epsilon = 1e-9);
        // At the magnetic equator the planet frequency is half the polar value at r = a
        assert_relative_eq!(line.f_planet, 2800.0 / 64.0 * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_frequency_above_band_is_unreachable() {
        let line = locate(&Vector3::z(), &Vector3::x(), 4.0, 1000.0, 2700.0, 100.0);
        assert!(line.f_max < 2700.0);
        assert!(!line.reachable);
    }

    #[test]
    fn test_frequency_below_surface_value_is_unreachable() {
        // f_min on the L = 4 shell is ~21.9 MHz
        let line = locate(&Vector3::z(), &Vector3::x(), 4.0, 1000.0, 10.0, 100.0);
        assert!(!line.reachable);
    }

    #[test]
    fn test_open_shell_needs_frequency_above_planet() {
        // Planet 3 degrees from the pole on a 2 R* orbit: L ≈ 730 > l_max
        let planet = planet_at_colatitude(3.0_f64.to_radians());
        let line = locate(&Vector3::z(), &planet, 2.0, 1000.0, 100.0, 100.0);
        assert!(line.shell > 100.0);
        assert!(line.f_planet > 100.0);
        assert!(!line.reachable);

        // Same geometry, frequency above the planet's local value
        let line = locate(&Vector3::z(), &planet, 2.0, 1000.0, 400.0, 100.0);
        assert!(line.f_planet < 400.0);
        assert!(line.reachable);

        // Raising l_max closes the line again and restores the plain band check
        let line = locate(&Vector3::z(), &planet, 2.0, 1000.0, 100.0, 1000.0);
        assert!(line.reachable);
    }

    #[test]
    fn test_on_axis_planet_is_finite() {
        let line = locate(&Vector3::z(), &Vector3::z(), 10.0, 430.0, 10.0, 100.0);
        assert!(line.shell.is_infinite());
        assert_eq!(line.sin_theta, 0.0);
        assert_eq!(line.equator, Vector3::zeros());
        assert_eq!(line.f_min, 0.0);
        assert_relative_eq!(line.f_max, 2.8 * 430.0, epsilon = 1e-9);
        assert_relative_eq!(line.f_planet, 2.8 * 430.0 / 1000.0, epsilon = 1e-9);
        assert!(line.reachable);
    }

    #[test]
    fn test_rounding_past_unit_cosine_is_clamped() {
        let pole = Vector3::new(0.0, 0.0, 1.0 + 1e-15);
        let line = locate(&pole, &Vector3::z(), 10.0, 430.0, 10.0, 100.0);
        assert_eq!(line.sin_theta, 0.0);
        assert!(line.shell.is_infinite());
    }
}
