//! The per-sample visibility model
//!
//! [`MaserModel`] converts a [`SystemParams`] record into fixed geometry
//! once, then classifies each time sample independently:
//!
//! 1. advance rotation and orbit to get the magnetic pole and planet vectors
//! 2. locate the planet's dipole field line and gate on reachable frequency
//! 3. solve for the emission radius on that line
//! 4. build each active hemisphere's cone axis and test it against the line
//!    of sight
//!
//! No state is carried between samples. [`MaserModel::evaluate`] is the
//! sequential, branching reference; the parallel and masked evaluators in
//! [`crate::parallel`] and [`crate::masked`] reproduce its decisions.

use log::{debug, trace, warn};
use ndarray::Array2;

use crate::constants::PhysicalConstants;
use crate::field_line::{self, FieldLine};
use crate::frame::ReferenceFrame;
use crate::kepler::orbital_period;
use crate::kinematics::{KinematicState, RotatingSystem};
use crate::params::{ModelConfig, SystemParams};
use crate::solver::{self, SolverOutcome};
use crate::visibility::{
    beam_angle, cone_axis, cone_coefficients, hemisphere_active, BeamOutcome, ConeWindow,
    Hemisphere,
};

/// Visibility of one time sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleVisibility {
    pub north: bool,
    pub south: bool,
}

impl SampleVisibility {
    /// Neither hemisphere visible
    pub const HIDDEN: SampleVisibility = SampleVisibility {
        north: false,
        south: false,
    };

    /// Visibility of one hemisphere
    pub fn get(&self, hemisphere: Hemisphere) -> bool {
        match hemisphere {
            Hemisphere::North => self.north,
            Hemisphere::South => self.south,
        }
    }
}

/// Visibility sequences for both hemispheres, one entry per time sample
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    pub north: Vec<bool>,
    pub south: Vec<bool>,
}

impl Visibility {
    /// All samples hidden
    pub fn hidden(len: usize) -> Self {
        Self {
            north: vec![false; len],
            south: vec![false; len],
        }
    }

    /// Number of time samples
    pub fn len(&self) -> usize {
        self.north.len()
    }

    pub fn is_empty(&self) -> bool {
        self.north.is_empty()
    }

    /// Sequence for one hemisphere
    pub fn hemisphere(&self, hemisphere: Hemisphere) -> &[bool] {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }

    /// Visibility of sample `index`
    pub fn sample(&self, index: usize) -> SampleVisibility {
        SampleVisibility {
            north: self.north[index],
            south: self.south[index],
        }
    }

    /// Number of visible samples in a hemisphere
    pub fn count(&self, hemisphere: Hemisphere) -> usize {
        self.hemisphere(hemisphere).iter().filter(|&&v| v).count()
    }

    /// Fraction of samples visible in a hemisphere, zero for an empty series
    pub fn fraction(&self, hemisphere: Hemisphere) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.count(hemisphere) as f64 / self.len() as f64
        }
    }

    /// A hemisphere as 0/1 floats
    pub fn as_f64(&self, hemisphere: Hemisphere) -> Vec<f64> {
        self.hemisphere(hemisphere)
            .iter()
            .map(|&v| if v { 1.0 } else { 0.0 })
            .collect()
    }

    /// Both hemispheres as a 2×N array of 0/1, North in row 0
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((2, self.len()), |(row, col)| {
            let visible = if row == 0 {
                self.north[col]
            } else {
                self.south[col]
            };
            if visible {
                1.0
            } else {
                0.0
            }
        })
    }
}

impl FromIterator<SampleVisibility> for Visibility {
    fn from_iter<I: IntoIterator<Item = SampleVisibility>>(iter: I) -> Self {
        let (north, south) = iter.into_iter().map(|s| (s.north, s.south)).unzip();
        Self { north, south }
    }
}

/// Every intermediate quantity of one sample, for inspection and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTrace {
    /// Geometry at the sample time
    pub state: KinematicState,
    /// The planet's field line and the reachability gate
    pub field_line: FieldLine,
    /// Emission radius solve, absent when the gate failed
    pub solution: Option<SolverOutcome>,
    pub north: BeamOutcome,
    pub south: BeamOutcome,
}

impl SampleTrace {
    /// Visibility decisions of this sample
    pub fn visibility(&self) -> SampleVisibility {
        SampleVisibility {
            north: self.north.visible,
            south: self.south.visible,
        }
    }

    /// Beam outcome of one hemisphere
    pub fn beam(&self, hemisphere: Hemisphere) -> &BeamOutcome {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }

    /// How far this sample got through the pipeline
    pub fn stage(&self) -> SampleStage {
        match self.solution {
            None => SampleStage::Gated,
            Some(s) if !s.converged => SampleStage::Unconverged,
            Some(s) if !s.accepted(self.field_line.shell) => SampleStage::OffFieldLine,
            Some(_) => SampleStage::Solved,
        }
    }
}

/// Last stage a sample reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStage {
    /// Failed the reachability gate, solver never ran
    Gated,
    /// Solver exhausted its iteration budget
    Unconverged,
    /// Solver converged outside 0 < r ≤ L
    OffFieldLine,
    /// Emission radius accepted, cone test ran
    Solved,
}

/// Visibility model for one star-planet system
#[derive(Debug, Clone)]
pub struct MaserModel {
    params: SystemParams,
    config: ModelConfig,
    system: RotatingSystem,
    window: ConeWindow,
}

impl MaserModel {
    /// Build the model, converting angles to radians and deriving the orbital period
    ///
    /// # Arguments
    /// * `params` - Physical parameters, angles in degrees
    /// * `constants` - Physical constants for the Kepler conversion
    /// * `config` - Shell limit and solver settings
    pub fn new(params: SystemParams, constants: &PhysicalConstants, config: ModelConfig) -> Self {
        let period = orbital_period(
            params.orbital_distance,
            params.stellar_mass,
            params.stellar_radius,
            constants,
        );

        let frame = ReferenceFrame::new(
            params.stellar_inclination.to_radians(),
            params.spin_orbit_angle.to_radians(),
            params.orbital_inclination.to_radians(),
        );

        let system = RotatingSystem::new(
            frame,
            params.obliquity.to_radians(),
            params.rotation_period,
            params.rotation_phase,
            period,
            params.orbital_phase,
        );

        let window = ConeWindow::new(
            params.cone_opening.to_radians(),
            params.cone_thickness.to_radians(),
        );

        Self {
            params,
            config,
            system,
            window,
        }
    }

    /// Model with CGS constants and default configuration
    pub fn with_defaults(params: SystemParams) -> Self {
        Self::new(params, &PhysicalConstants::CGS, ModelConfig::default())
    }

    pub fn params(&self) -> &SystemParams {
        &self.params
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Rotation and orbit kinematics
    pub fn system(&self) -> &RotatingSystem {
        &self.system
    }

    /// Cone wall window in radians
    pub fn window(&self) -> &ConeWindow {
        &self.window
    }

    /// Planet orbital period (days)
    pub fn orbital_period(&self) -> f64 {
        self.system.orbital_period()
    }

    /// Whether any sample can be visible at the observing frequency
    pub fn emission_possible(&self) -> bool {
        self.params.emission_possible()
    }

    /// Locate the field line for a kinematic state
    pub fn locate(&self, state: &KinematicState) -> FieldLine {
        field_line::locate(
            &state.magnetic_pole,
            &state.planet,
            self.params.orbital_distance,
            self.params.polar_field,
            self.params.frequency,
            self.config.l_max,
        )
    }

    /// Solve for the emission radius on a field line
    pub fn solve(&self, line: &FieldLine) -> SolverOutcome {
        solver::solve_emission_radius(
            solver::target_field(self.params.frequency),
            self.params.polar_field,
            line.shell,
            &self.config.solver,
        )
    }

    /// Whether a hemisphere's activation rule holds on a field line
    pub fn hemisphere_active(&self, hemisphere: Hemisphere, line: &FieldLine) -> bool {
        hemisphere_active(
            hemisphere,
            line.cos_theta,
            self.params.frequency,
            line.f_planet,
            line.shell,
            self.config.l_max,
        )
    }

    /// Run every stage for a given kinematic state
    pub fn trace_state(&self, state: KinematicState) -> SampleTrace {
        let line = self.locate(&state);

        let hidden = SampleTrace {
            state,
            field_line: line,
            solution: None,
            north: BeamOutcome::HIDDEN,
            south: BeamOutcome::HIDDEN,
        };

        if !line.reachable {
            return hidden;
        }

        let solution = self.solve(&line);
        if !solution.accepted(line.shell) {
            trace!(
                "Emission radius rejected: r = {}, residual = {}, {} iterations",
                solution.radius,
                solution.residual,
                solution.iterations
            );
            return SampleTrace {
                solution: Some(solution),
                ..hidden
            };
        }

        let coefficients = cone_coefficients(solution.radius, line.shell);
        let line_of_sight = self.system.frame().line_of_sight();

        let beam = |hemisphere: Hemisphere| {
            if !self.hemisphere_active(hemisphere, &line) {
                return BeamOutcome::HIDDEN;
            }
            let axis = cone_axis(hemisphere, &coefficients, &line.equator, &state.magnetic_pole);
            let gamma = beam_angle(&axis, line_of_sight);
            BeamOutcome {
                active: true,
                gamma: Some(gamma),
                visible: self.window.contains(gamma),
            }
        };

        SampleTrace {
            solution: Some(solution),
            north: beam(Hemisphere::North),
            south: beam(Hemisphere::South),
            ..hidden
        }
    }

    /// Run every stage for the sample at `time_days`
    pub fn trace_sample(&self, time_days: f64) -> SampleTrace {
        self.trace_state(self.system.state_at(time_days))
    }

    /// Visibility of a single time sample
    pub fn sample(&self, time_days: f64) -> SampleVisibility {
        if !self.emission_possible() {
            return SampleVisibility::HIDDEN;
        }
        self.trace_sample(time_days).visibility()
    }

    /// Visibility at every time in `times`, evaluated sequentially
    pub fn evaluate(&self, times: &[f64]) -> Visibility {
        if !self.emission_possible() {
            debug!(
                "Observing frequency {} MHz exceeds polar cyclotron frequency {} MHz",
                self.params.frequency,
                self.params.max_frequency()
            );
            return Visibility::hidden(times.len());
        }

        debug!(
            "Evaluating {} samples, orbital period {:.4} d",
            times.len(),
            self.orbital_period()
        );

        let mut gated = 0usize;
        let mut unconverged = 0usize;
        let mut off_line = 0usize;
        let visibility: Visibility = times
            .iter()
            .map(|&t| {
                let trace = self.trace_sample(t);
                match trace.stage() {
                    SampleStage::Gated => gated += 1,
                    SampleStage::Unconverged => unconverged += 1,
                    SampleStage::OffFieldLine => off_line += 1,
                    SampleStage::Solved => {}
                }
                trace.visibility()
            })
            .collect();

        debug!("{gated} samples failed the reachability gate");
        if off_line > 0 {
            debug!("{off_line} samples converged outside their field line");
        }
        if unconverged > 0 {
            warn!(
                "{unconverged} samples did not converge within {} iterations",
                self.config.solver.max_iterations
            );
        }

        visibility
    }
}

/// Evaluate visibility for a parameter set over `times`
///
/// The frequency pre-check runs before any geometry is built; when the
/// observing frequency exceeds the polar cyclotron frequency every sample is
/// hidden.
pub fn maser(params: &SystemParams, times: &[f64]) -> Visibility {
    if !params.emission_possible() {
        return Visibility::hidden(times.len());
    }
    MaserModel::with_defaults(*params).evaluate(times)
}
