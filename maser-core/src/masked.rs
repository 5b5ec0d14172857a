//! Branch-free batch evaluation over whole time arrays
//!
//! Every stage runs over all samples at once with [`ndarray::Zip`] on the
//! rayon pool. Instead of skipping samples that fail a test, each test
//! yields a 0/1 mask and all later stages still run for every lane. The
//! final visibility is the product of the masks, so values computed on
//! lanes that were already rejected (including NaN) never reach the output.
//!
//! The Newton solve runs a shared iteration loop. A lane freezes once its
//! residual meets the tolerance, which reproduces the per-sample early exit
//! of the sequential solver step for step.

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Zip};

use crate::field_line::FieldLine;
use crate::kinematics::KinematicState;
use crate::model::{MaserModel, Visibility};
use crate::solver::{self, SolverConfig};
use crate::visibility::{beam_angle, cone_axis, cone_coefficients, ConeCoefficients, Hemisphere};

/// 1.0 where `condition` holds, 0.0 otherwise
#[inline]
fn step(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Lane-wise select between an updated and a held value
#[inline]
fn select(condition: bool, updated: f64, held: f64) -> f64 {
    if condition {
        updated
    } else {
        held
    }
}

/// Batch visibility as 0/1 masks plus the raw solver state of every lane
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedVisibility {
    /// 2×N array of 0/1, North in row 0
    pub mask: Array2<f64>,
    /// Emission radius of every lane, meaningful only where the gate passed
    pub radius: Array1<f64>,
    /// Final relative field mismatch of every lane
    pub residual: Array1<f64>,
}

impl MaskedVisibility {
    fn hidden(len: usize) -> Self {
        Self {
            mask: Array2::zeros((2, len)),
            radius: Array1::from_elem(len, f64::NAN),
            residual: Array1::from_elem(len, f64::NAN),
        }
    }

    /// Number of time samples
    pub fn len(&self) -> usize {
        self.mask.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn north(&self) -> ArrayView1<'_, f64> {
        self.mask.row(0)
    }

    pub fn south(&self) -> ArrayView1<'_, f64> {
        self.mask.row(1)
    }

    /// Mask row of one hemisphere
    pub fn hemisphere(&self, hemisphere: Hemisphere) -> ArrayView1<'_, f64> {
        match hemisphere {
            Hemisphere::North => self.north(),
            Hemisphere::South => self.south(),
        }
    }

    /// Number of visible samples in a hemisphere
    pub fn count(&self, hemisphere: Hemisphere) -> usize {
        self.hemisphere(hemisphere).iter().filter(|&&m| m > 0.5).count()
    }

    /// Convert the masks to boolean sequences
    pub fn to_visibility(&self) -> Visibility {
        Visibility {
            north: self.north().iter().map(|&m| m > 0.5).collect(),
            south: self.south().iter().map(|&m| m > 0.5).collect(),
        }
    }
}

/// Newton solve over every lane with per-lane freezing
///
/// # Returns
/// Final radius and residual for each shell
fn solve_lanes(
    target: f64,
    polar_field: f64,
    shells: &Array1<f64>,
    config: &SolverConfig,
) -> (Array1<f64>, Array1<f64>) {
    let ratio_sq = (target / polar_field).powi(2);
    let tolerance = config.tolerance;

    let mut radius = Array1::from_elem(shells.len(), 1.0);
    let mut mismatch = Zip::from(&radius).and(shells).par_map_collect(|&r, &shell| {
        solver::residual(solver::field_strength(polar_field, shell, r), target)
    });

    for iteration in 0..config.max_iterations {
        let pending = mismatch
            .iter()
            .filter(|&&m| !solver::is_converged(m, tolerance))
            .count();
        if pending == 0 {
            debug!("All lanes converged after {iteration} iterations");
            break;
        }

        Zip::from(&mut radius)
            .and(&mut mismatch)
            .and(shells)
            .par_for_each(|r, m, &shell| {
                let open = !solver::is_converged(*m, tolerance);
                let next = solver::newton_step(*r, ratio_sq, shell);
                let next_mismatch =
                    solver::residual(solver::field_strength(polar_field, shell, next), target);
                *r = select(open, next, *r);
                *m = select(open, next_mismatch, *m);
            });
    }

    (radius, mismatch)
}

/// Mask of lanes where `hemisphere` is active and its cone wall crosses the line of sight
fn hemisphere_mask(
    model: &MaserModel,
    hemisphere: Hemisphere,
    states: &Array1<KinematicState>,
    lines: &Array1<FieldLine>,
    coefficients: &Array1<ConeCoefficients>,
) -> Array1<f64> {
    let line_of_sight = model.system().frame().line_of_sight();
    let window = model.window();

    Zip::from(states)
        .and(lines)
        .and(coefficients)
        .par_map_collect(|state, line, c| {
            let active = step(model.hemisphere_active(hemisphere, line));
            let axis = cone_axis(hemisphere, c, &line.equator, &state.magnetic_pole);
            let inside = step(window.contains(beam_angle(&axis, line_of_sight)));
            active * inside
        })
}

/// Evaluate visibility over `times` as masked array operations
///
/// Produces exactly the decisions of [`MaserModel::evaluate`].
pub fn evaluate_masked(model: &MaserModel, times: &[f64]) -> MaskedVisibility {
    let len = times.len();
    if !model.emission_possible() {
        return MaskedVisibility::hidden(len);
    }

    let params = model.params();
    let config = model.config();
    let times = ArrayView1::from(times);

    let system = model.system();
    let states: Array1<KinematicState> = Zip::from(times).par_map_collect(|&t| system.state_at(t));
    let lines: Array1<FieldLine> = Zip::from(&states).par_map_collect(|s| model.locate(s));

    let gate = lines.mapv(|line| step(line.reachable));
    let shells = lines.mapv(|line| line.shell);

    let (radius, residual) = solve_lanes(
        solver::target_field(params.frequency),
        params.polar_field,
        &shells,
        &config.solver,
    );

    let tolerance = config.solver.tolerance;
    let accepted = Zip::from(&radius)
        .and(&residual)
        .and(&shells)
        .par_map_collect(|&r, &m, &shell| {
            step(solver::is_accepted(r, m, shell, solver::is_converged(m, tolerance)))
        });

    let coefficients: Array1<ConeCoefficients> = Zip::from(&radius)
        .and(&shells)
        .par_map_collect(|&r, &shell| cone_coefficients(r, shell));

    let usable = &gate * &accepted;
    let north = hemisphere_mask(model, Hemisphere::North, &states, &lines, &coefficients) * &usable;
    let south = hemisphere_mask(model, Hemisphere::South, &states, &lines, &coefficients) * &usable;

    debug!(
        "Masked evaluation of {len} samples: {} gated out, {} north, {} south",
        gate.iter().filter(|&&g| g == 0.0).count(),
        north.sum(),
        south.sum()
    );

    let mask = Array2::from_shape_fn((2, len), |(row, col)| {
        if row == 0 {
            north[col]
        } else {
            south[col]
        }
    });

    MaskedVisibility {
        mask,
        radius,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SystemParams;
    use crate::solver::solve_emission_radius;
    use approx::assert_relative_eq;

    fn au_mic() -> SystemParams {
        SystemParams::from_array([
            0.5, 0.75, 4.86, 90.0, 430.0, 20.0, 0.2, 10.0, 89.18, 0.0, 0.6, 10.0, 75.0, 5.0,
        ])
    }

    #[test]
    fn test_lanes_match_scalar_solver() {
        let config = SolverConfig::default();
        let shells = Array1::from(vec![10.0, 12.0, 40.0, 250.0, f64::INFINITY, 1.0]);
        let target = solver::target_field(10.0);

        let (radius, residual) = solve_lanes(target, 430.0, &shells, &config);

        for (i, &shell) in shells.iter().enumerate() {
            let scalar = solve_emission_radius(target, 430.0, shell, &config);
            assert_eq!(radius[i].to_bits(), scalar.radius.to_bits());
            assert_eq!(residual[i].to_bits(), scalar.residual.to_bits());
        }
    }

    #[test]
    fn test_masks_are_binary() {
        let model = MaserModel::with_defaults(au_mic());
        let times: Vec<f64> = (0..3000).map(|i| i as f64 * 0.003).collect();
        let result = evaluate_masked(&model, &times);

        assert_eq!(result.mask.shape(), &[2, 3000]);
        assert!(result.mask.iter().all(|&m| m == 0.0 || m == 1.0));
    }

    #[test]
    fn test_matches_sequential() {
        let model = MaserModel::with_defaults(au_mic());
        let times: Vec<f64> = (0..3000).map(|i| i as f64 * 0.003).collect();
        let result = evaluate_masked(&model, &times);
        let expected = model.evaluate(&times);

        assert_eq!(result.to_visibility(), expected);
        for hemisphere in Hemisphere::ALL {
            assert_eq!(result.count(hemisphere), expected.count(hemisphere));
        }
    }

    #[test]
    fn test_precheck_returns_zero_mask() {
        let mut params = au_mic();
        params.frequency = 5000.0;
        let model = MaserModel::with_defaults(params);

        let result = evaluate_masked(&model, &[0.0, 1.0, 2.0]);
        assert_eq!(result.len(), 3);
        assert_relative_eq!(result.mask.sum(), 0.0);
        assert!(result.residual.iter().all(|r| r.is_nan()));
    }

    #[test]
    fn test_empty_input() {
        let model = MaserModel::with_defaults(au_mic());
        let result = evaluate_masked(&model, &[]);
        assert!(result.is_empty());
        assert!(result.to_visibility().is_empty());
    }
}
