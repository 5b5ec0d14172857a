//! Analysis of light curves produced by the visibility model

use maser_analysis::{
    events, frequency_grid, group_events, lomb_scargle, observed_minus_calculated, top_peaks,
    DutyCycle, DEFAULT_PEAK_COUNT,
};
use maser_core::{evaluate_masked, maser, Hemisphere, MaserModel};
use test_helpers::{au_mic_params, uniform_times};

#[test]
fn test_au_mic_events_are_short_and_ordered() {
    let times = uniform_times(0.0, 40.0, 40_000);
    let vis = maser(&au_mic_params(), &times);

    for hemisphere in Hemisphere::ALL {
        let found = events(&times, vis.hemisphere(hemisphere)).unwrap();
        assert!(found.len() >= 10, "{hemisphere}: {} events", found.len());

        for event in &found {
            assert!(event.start <= event.end);
            assert!(event.duration < 1.0);
            assert!(event.centre >= event.start && event.centre <= event.end);
        }
        for pair in found.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }

        let centres: Vec<f64> = found.iter().map(|e| e.centre).collect();
        let gaps = group_events(&centres);
        assert_eq!(gaps.len(), centres.len() - 1);
        assert!(gaps.iter().all(|g| g.spacing > 0.0));

        let oc = observed_minus_calculated(&centres).unwrap();
        assert_eq!(oc.len(), centres.len());
        assert_eq!(oc[0], 0.0);
        assert!(oc.iter().all(|r| r.is_finite() && r.abs() < 40.0));
    }
}

#[test]
fn test_duty_cycle_matches_visibility_counts() {
    let times = uniform_times(0.0, 20.0, 20_000);
    let vis = maser(&au_mic_params(), &times);

    for hemisphere in Hemisphere::ALL {
        let duty = DutyCycle::from_series(vis.hemisphere(hemisphere));
        assert_eq!(duty.visible, vis.count(hemisphere));
        assert_eq!(duty.total, 20_000);
        assert_eq!(duty.fraction, vis.fraction(hemisphere));
    }
}

#[test]
fn test_masked_and_sequential_give_the_same_events() {
    let times = uniform_times(0.0, 20.0, 10_000);
    let model = MaserModel::with_defaults(au_mic_params());
    let sequential = model.evaluate(&times);
    let masked = evaluate_masked(&model, &times).to_visibility();

    for hemisphere in Hemisphere::ALL {
        assert_eq!(
            events(&times, sequential.hemisphere(hemisphere)).unwrap(),
            events(&times, masked.hemisphere(hemisphere)).unwrap()
        );
    }
}

#[test]
fn test_periodogram_of_visibility_series() {
    let times = uniform_times(0.0, 40.0, 8_000);
    let vis = maser(&au_mic_params(), &times);
    let freqs = frequency_grid(0.05, 3.0, 600).unwrap();

    let power = lomb_scargle(&times, &vis.as_f64(Hemisphere::North), &freqs).unwrap();
    assert_eq!(power.len(), freqs.len());
    assert!(power.iter().all(|&p| (0.0..=1.0 + 1e-9).contains(&p)));

    let top = top_peaks(&freqs, &power, 0.0, DEFAULT_PEAK_COUNT).unwrap();
    assert_eq!(top.positions.len(), DEFAULT_PEAK_COUNT);
    assert!(top.positions.iter().all(|&f| (0.05..=3.0).contains(&f)));
    assert!(top.prominences.windows(2).all(|w| w[0] >= w[1]));
}
