//! Cross-pattern invariants and the six seeded reference scenarios.
//!
//! These exercise [`PatternHandle`] end to end, the way a host application
//! would, rather than poking at one tabulated/analytic module in isolation.

use antenna_formats::angle::SMALL_DB;
use antenna_patterns::traits::PatternGain;
use antenna_patterns::{GainQuery, PatternHandle, Polarity, QueryError};
use approx::assert_relative_eq;

/// A table pattern whose azimuth cut is stored only on `[0, max]`, with a
/// non-constant shape, so `Symmetry::Mirror` folding is the only thing that
/// could make `gain(+az) == gain(-az)` hold.
fn small_pat_handle() -> PatternHandle {
    let mut pattern = PatternHandle::new_table();
    pattern.set_symmetry(2).unwrap();
    pattern.set_azim_sample(0.0, 0.0);
    pattern.set_azim_sample(2.0_f64.to_radians(), -3.0);
    pattern.set_azim_sample(4.0_f64.to_radians(), -10.0);
    pattern.set_elev_sample(0.0, 0.0);
    pattern.set_elev_sample(5.0_f64.to_radians(), 0.0);
    pattern.set_valid(true);
    pattern
}

#[test]
fn min_max_gain_brackets_gain_for_every_analytic_model() {
    let models = [
        PatternHandle::new_gauss(),
        PatternHandle::new_csc_sq(),
        PatternHandle::new_sin_xx(),
        PatternHandle::new_pedestal(),
        PatternHandle::new_omni(),
    ];
    let azimuths = [-1.2_f64, -0.3, 0.0, 0.4, 1.5];

    for model in &models {
        for &az in &azimuths {
            let q = GainQuery::builder()
                .ref_gain(18.0_f32)
                .hbw(5.0_f64.to_radians())
                .vbw(8.0_f64.to_radians())
                .azim(az)
                .build()
                .unwrap();
            let gain = model.gain(&q);
            let (min, max) = model.min_max_gain(&q);
            assert!(
                gain >= min - 1e-4 && gain <= max + 1e-4,
                "{:?} gain {gain} outside [{min}, {max}] at az={az}",
                model.pattern_type()
            );
        }
    }
}

#[test]
fn gain_is_periodic_in_azimuth_for_boresight_symmetric_models() {
    let gauss = PatternHandle::new_gauss();
    let base = GainQuery::builder()
        .ref_gain(20.0_f32)
        .hbw(4.0_f64.to_radians())
        .vbw(4.0_f64.to_radians())
        .azim(0.3_f64);
    let shifted = base.clone().azim(0.3 + 2.0 * std::f64::consts::PI).build().unwrap();
    let base = base.build().unwrap();
    assert_relative_eq!(gauss.gain(&base) as f64, gauss.gain(&shifted) as f64, epsilon = 1e-4);
}

#[test]
fn pat_symmetry_two_mirrors_the_stored_half() {
    let pattern = small_pat_handle();
    let q_pos = GainQuery::builder().ref_gain(10.0_f32).azim(3.0_f64.to_radians()).build().unwrap();
    let q_neg = GainQuery::builder().ref_gain(10.0_f32).azim((-3.0_f64).to_radians()).build().unwrap();
    assert_relative_eq!(pattern.gain(&q_pos) as f64, pattern.gain(&q_neg) as f64, epsilon = 1e-6);
}

#[test]
fn omni_gain_is_constant_across_the_full_sphere() {
    let omni = PatternHandle::new_omni();
    let samples = [(-3.0, 1.0), (0.0, 0.0), (2.9, -1.5), (1.3, -0.2)];
    for (az, el) in samples {
        let q = GainQuery::builder().ref_gain(17.5_f32).azim(az).elev(el).build().unwrap();
        assert_relative_eq!(omni.gain(&q) as f64, 17.5, epsilon = 1e-6);
    }
}

#[test]
fn analytic_models_peak_at_boresight() {
    for model in [
        PatternHandle::new_gauss(),
        PatternHandle::new_csc_sq(),
        PatternHandle::new_sin_xx(),
        PatternHandle::new_pedestal(),
    ] {
        let boresight = GainQuery::builder()
            .ref_gain(22.0_f32)
            .hbw(5.0_f64.to_radians())
            .vbw(5.0_f64.to_radians())
            .build()
            .unwrap();
        let off_axis = GainQuery::builder()
            .ref_gain(22.0_f32)
            .hbw(5.0_f64.to_radians())
            .vbw(5.0_f64.to_radians())
            .azim(10.0_f64.to_radians())
            .build()
            .unwrap();
        assert!(
            model.gain(&boresight) >= model.gain(&off_axis),
            "{:?} is not maximal at boresight",
            model.pattern_type()
        );
    }
}

// --- The six seeded reference scenarios ---

#[test]
fn scenario_omni_refgain_20_offaxis() {
    let omni = PatternHandle::new_omni();
    let q = GainQuery::builder().ref_gain(20.0_f32).azim(1.3_f64).elev(-0.2_f64).build().unwrap();
    assert_relative_eq!(omni.gain(&q) as f64, 20.0, epsilon = 1e-6);
}

#[test]
fn scenario_gauss_boresight_and_three_degrees_off() {
    let gauss = PatternHandle::new_gauss();
    let boresight = GainQuery::builder()
        .ref_gain(25.0_f32)
        .hbw(3.0_f64.to_radians())
        .vbw(5.0_f64.to_radians())
        .build()
        .unwrap();
    assert_relative_eq!(gauss.gain(&boresight) as f64, 25.0, epsilon = 1e-6);

    let three_deg = GainQuery::builder()
        .ref_gain(25.0_f32)
        .hbw(3.0_f64.to_radians())
        .vbw(5.0_f64.to_radians())
        .azim(3.0_f64.to_radians())
        .build()
        .unwrap();
    assert_relative_eq!(gauss.gain(&three_deg) as f64, 22.0, epsilon = 0.05);
}

#[test]
fn scenario_sinxx_boresight_and_first_null_band() {
    let sinxx = PatternHandle::new_sin_xx();
    let boresight = GainQuery::builder()
        .ref_gain(20.0_f32)
        .hbw(5.0_f64.to_radians())
        .vbw(8.0_f64.to_radians())
        .first_side_lobe(-13.2_f32)
        .build()
        .unwrap();
    assert_relative_eq!(sinxx.gain(&boresight) as f64, 20.0, epsilon = 1e-6);

    // the natural first null of this shape, in the normalized sinc argument,
    // sits where x == 1 i.e. az == hbw/2 / 0.4429.
    let half_hbw = 2.5_f64.to_radians();
    let null_az = half_hbw / 0.4429;
    let near_null = GainQuery::builder()
        .ref_gain(20.0_f32)
        .hbw(5.0_f64.to_radians())
        .vbw(8.0_f64.to_radians())
        .first_side_lobe(-13.2_f32)
        .azim(null_az)
        .build()
        .unwrap();
    let gain = sinxx.gain(&near_null) as f64;
    assert!(gain >= -13.5 && gain <= -12.9, "gain near first null was {gain}");
}

#[test]
fn scenario_pat_symmetry_two_flat_azimuth_equals_ref_gain_everywhere() {
    let mut pattern = PatternHandle::new_table();
    pattern.set_symmetry(2).unwrap();
    for i in 0..36 {
        let deg = i as f64 * 5.0;
        pattern.set_azim_sample(deg.to_radians(), 0.0);
    }
    pattern.set_elev_sample((-5.0_f64).to_radians(), 0.0);
    pattern.set_elev_sample(0.0, 0.0);
    pattern.set_elev_sample(5.0_f64.to_radians(), 0.0);
    pattern.set_valid(true);

    for az_deg in [0.0, 12.0, 47.0, 91.0, 179.0] {
        let q = GainQuery::builder().ref_gain(14.0_f32).azim(az_deg.to_radians()).build().unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 14.0, epsilon = 1e-6);
    }
}

#[test]
fn scenario_cruise_identical_voltage_gains_match_across_frequency() {
    use antenna_formats::parsers::cruise;

    const FIXTURE: &str = "\
AZIMUTH
3 5
-10 10
8.0 9.0 10.0 11.0 12.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
ELEVATION
3 5
-5 5
8.0 9.0 10.0 11.0 12.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
";
    let table = cruise::parse(FIXTURE).unwrap();
    let pattern = antenna_patterns::tabulated::Cruise::new(table);

    let at_9 = GainQuery::builder().ref_gain(0.0_f32).freq(9.0e9_f64).build().unwrap();
    let at_10 = GainQuery::builder().ref_gain(0.0_f32).freq(10.0e9_f64).build().unwrap();
    let at_8 = GainQuery::builder().ref_gain(0.0_f32).freq(8.0e9_f64).build().unwrap();
    assert_relative_eq!(pattern.gain(&at_9) as f64, pattern.gain(&at_10) as f64, epsilon = 1e-6);
    assert_relative_eq!(pattern.gain(&at_9) as f64, pattern.gain(&at_8) as f64, epsilon = 1e-6);
}

#[test]
fn scenario_monopulse_out_of_range_frequency_reports_last_error() {
    use antenna_formats::parsers::monopulse;

    const FIXTURE: &str = "\
SUM
2 2 2
-2 4
-2 4
9.0 11.0
0.0 0.0 -3.0 0.0
-3.0 0.0 -6.0 0.0
0.0 0.0 -3.0 0.0
-3.0 0.0 -6.0 0.0
DIFF
2 2 2
-2 4
-2 4
9.0 11.0
-20.0 90.0 -15.0 90.0
-15.0 90.0 -10.0 90.0
-20.0 90.0 -15.0 90.0
-15.0 90.0 -10.0 90.0
";
    let table = monopulse::parse(FIXTURE).unwrap();
    let pattern = antenna_patterns::tabulated::Monopulse::new(table);

    let q = GainQuery::builder().ref_gain(20.0_f32).freq(1.0e9_f64).polarity(Polarity::Unknown).build().unwrap();
    assert_eq!(pattern.gain(&q), SMALL_DB);
    assert_eq!(pattern.last_error(), Some(QueryError::UnsupportedFrequency));
}
