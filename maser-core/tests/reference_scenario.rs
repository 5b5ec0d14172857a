//! End-to-end behaviour of the visibility model on reference systems

use maser_core::{maser, Hemisphere, MaserModel, SampleVisibility, SystemParams};
use test_helpers::{au_mic_params, m_dwarf_params, uniform_times};

fn reference_grid() -> Vec<f64> {
    uniform_times(0.0, 40.0, 40_000)
}

#[test]
fn test_au_mic_visible_fraction() {
    let vis = maser(&au_mic_params(), &reference_grid());
    assert_eq!(vis.len(), 40_000);

    // On this grid; the published 1300 (north) and 1297 (south) used a different sampling
    assert_eq!(vis.count(Hemisphere::North), 1314);
    assert_eq!(vis.count(Hemisphere::South), 1312);
    for hemisphere in Hemisphere::ALL {
        let fraction = vis.fraction(hemisphere);
        assert!(fraction > 0.03 && fraction < 0.035, "{hemisphere}: {fraction}");
    }
}

#[test]
fn test_m_dwarf_both_hemispheres_visible() {
    let vis = maser(&m_dwarf_params(), &reference_grid());
    for hemisphere in Hemisphere::ALL {
        let fraction = vis.fraction(hemisphere);
        assert!(fraction > 0.005 && fraction < 0.1, "{hemisphere}: {fraction}");
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let times = reference_grid();
    let first = maser(&au_mic_params(), &times);
    let second = maser(&au_mic_params(), &times);
    assert_eq!(first, second);
}

#[test]
fn test_frequency_above_polar_cyclotron_hides_everything() {
    let mut params = au_mic_params();
    params.frequency = params.max_frequency() * 1.001;

    let vis = maser(&params, &reference_grid());
    assert_eq!(vis.len(), 40_000);
    assert_eq!(vis.count(Hemisphere::North), 0);
    assert_eq!(vis.count(Hemisphere::South), 0);
}

#[test]
fn test_wider_cone_wall_never_hides_a_visible_sample() {
    let times = uniform_times(0.0, 20.0, 10_000);
    let mut previous: Option<maser_core::Visibility> = None;

    for thickness in [1.0, 5.0, 10.0, 20.0] {
        let params = SystemParams {
            cone_thickness: thickness,
            ..au_mic_params()
        };
        let vis = maser(&params, &times);

        if let Some(narrow) = &previous {
            for hemisphere in Hemisphere::ALL {
                let wide = vis.hemisphere(hemisphere);
                for (i, &was_visible) in narrow.hemisphere(hemisphere).iter().enumerate() {
                    if was_visible {
                        assert!(wide[i], "sample {i} lost at thickness {thickness}");
                    }
                }
                assert!(vis.count(hemisphere) >= narrow.count(hemisphere));
            }
        }
        previous = Some(vis);
    }
}

#[test]
fn test_zero_thickness_cone_is_never_visible() {
    let params = SystemParams {
        cone_thickness: 0.0,
        ..au_mic_params()
    };
    let vis = maser(&params, &uniform_times(0.0, 10.0, 5_000));
    assert_eq!(vis.count(Hemisphere::North), 0);
    assert_eq!(vis.count(Hemisphere::South), 0);
}

#[test]
fn test_visible_samples_pass_every_stage() {
    let model = MaserModel::with_defaults(m_dwarf_params());
    let l_max = model.config().l_max;
    let frequency = model.params().frequency;

    for &t in &uniform_times(0.0, 5.0, 5_000) {
        let trace = model.trace_sample(t);
        let line = trace.field_line;

        if trace.visibility() == SampleVisibility::HIDDEN {
            continue;
        }

        assert!(line.reachable);
        assert!(frequency >= line.f_min && frequency <= line.f_max);
        assert!(!(line.shell > l_max && line.f_planet > frequency));

        let solution = trace.solution.expect("visible sample without a solution");
        assert!(solution.converged);
        assert!(solution.radius > 0.0 && solution.radius <= line.shell);
    }
}

#[test]
fn test_unreachable_samples_are_hidden() {
    // A weak dipole puts short field lines below the observing frequency
    let params = SystemParams {
        polar_field: 20.0,
        frequency: 53.0,
        ..m_dwarf_params()
    };
    let model = MaserModel::with_defaults(params);

    let mut gated = 0;
    for &t in &uniform_times(0.0, 5.0, 2_000) {
        let trace = model.trace_sample(t);
        if !trace.field_line.reachable {
            gated += 1;
            assert_eq!(trace.visibility(), SampleVisibility::HIDDEN);
            assert!(trace.solution.is_none());
        }
    }
    assert!(gated > 0);
}

#[test]
fn test_solver_converges_within_budget_for_reference_system() {
    let model = MaserModel::with_defaults(au_mic_params());
    for &t in &uniform_times(0.0, 10.0, 2_000) {
        let trace = model.trace_sample(t);
        if let Some(solution) = trace.solution {
            assert!(solution.iterations <= model.config().solver.max_iterations);
            assert!(solution.accepted(trace.field_line.shell));
        }
    }
}
