//! Kepler's third law conversions between orbital distance and period
//!
//! Distances are in stellar radii and periods in days, the units the
//! visibility model uses. Masses and radii are in solar units.

use std::f64::consts::PI;

use crate::constants::PhysicalConstants;

/// Orbital period (days) of a planet at `distance` stellar radii
///
/// P = 2π·sqrt((a·R)³ / (G·M)), with a·R converted to centimeters and M to
/// grams before dividing by seconds per day.
///
/// # Arguments
/// * `distance` - Orbital distance in stellar radii
/// * `stellar_mass` - Stellar mass in solar masses
/// * `stellar_radius` - Stellar radius in solar radii
/// * `constants` - Physical constants to convert with
pub fn orbital_period(
    distance: f64,
    stellar_mass: f64,
    stellar_radius: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let semi_major_axis = distance * stellar_radius * constants.solar_radius;
    let gm = constants.gravitational_constant * stellar_mass * constants.solar_mass;
    2.0 * PI * (semi_major_axis.powi(3) / gm).sqrt() / constants.seconds_per_day
}

/// Orbital distance (stellar radii) of a planet with period `period` days
///
/// Inverse of [`orbital_period`].
pub fn orbital_distance(
    period: f64,
    stellar_mass: f64,
    stellar_radius: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let gm = constants.gravitational_constant * stellar_mass * constants.solar_mass;
    let angular = period * constants.seconds_per_day / (2.0 * PI);
    angular.powf(2.0 / 3.0) * gm.powf(1.0 / 3.0) / (stellar_radius * constants.solar_radius)
}
