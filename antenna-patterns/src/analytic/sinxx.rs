//! `sin(x)/x` main-lobe pattern whose first side-lobe is pinned to the
//! query's `firstSideLobe` level rather than the natural -13.2 dB sinc
//! side-lobe.

use crate::analytic::{apply_back_lobe_floor, default_min_max};
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;

const DEFAULT_FIRST_SIDE_LOBE_DB: f32 = -13.2;
const DEFAULT_BACK_LOBE_DB: f32 = -30.0;

/// Natural first null of `sinc(x) = sin(pi x)/(pi x)` in the normalized
/// argument used below, where the beamwidth maps the half-power point to
/// `x = 1`.
const SINC_HALF_POWER_X: f64 = 0.4429;

#[derive(Debug, Clone, Copy, Default)]
pub struct SinXX;

impl SinXX {
    pub fn new() -> Self {
        Self
    }

    fn sinc(x: f64) -> f64 {
        if x.abs() < 1e-9 {
            1.0
        } else {
            (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x)
        }
    }

    /// `shape(az, el)` in dB, scaling the sinc argument so that `az == hbw/2`
    /// (and `el == vbw/2`) land on the -3 dB half-power point, then rescaling
    /// the natural sinc floor up to the caller's requested first side-lobe.
    fn shape_db(azim: f64, elev: f64, hbw: f64, vbw: f64, first_side_lobe: f64) -> f64 {
        let half_hbw = (hbw / 2.0).max(f64::EPSILON);
        let half_vbw = (vbw / 2.0).max(f64::EPSILON);
        let x_az = azim / half_hbw * SINC_HALF_POWER_X;
        let x_el = elev / half_vbw * SINC_HALF_POWER_X;
        let natural_db = 20.0 * (Self::sinc(x_az) * Self::sinc(x_el)).abs().max(1e-12).log10();

        const NATURAL_FIRST_SIDE_LOBE_DB: f64 = -13.2;
        if natural_db >= 0.0 {
            natural_db
        } else {
            natural_db * (first_side_lobe / NATURAL_FIRST_SIDE_LOBE_DB)
        }
    }
}

impl PatternGain for SinXX {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let first_side_lobe = query.resolved_first_side_lobe(DEFAULT_FIRST_SIDE_LOBE_DB) as f64;
        let back_lobe = query.resolved_back_lobe(DEFAULT_BACK_LOBE_DB);

        let shape = Self::shape_db(azim, elev, query.hbw, query.vbw, first_side_lobe);
        let gain = query.ref_gain as f64 + shape;
        let gain = apply_back_lobe_floor(gain, azim, back_lobe);
        clamp_small_db(gain as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        default_min_max(query, DEFAULT_FIRST_SIDE_LOBE_DB, DEFAULT_BACK_LOBE_DB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn boresight_equals_ref_gain() {
        let sinxx = SinXX::new();
        let q = GainQuery::builder()
            .ref_gain(22.0_f32)
            .hbw(0.1_f64)
            .vbw(0.1_f64)
            .build()
            .unwrap();
        assert_relative_eq!(sinxx.gain(&q) as f64, 22.0, epsilon = 1e-6);
    }

    #[test]
    fn half_power_point_is_about_3db_down() {
        let sinxx = SinXX::new();
        let q = GainQuery::builder()
            .ref_gain(22.0_f32)
            .hbw(0.2_f64)
            .vbw(0.2_f64)
            .azim(0.1_f64) // hbw/2
            .build()
            .unwrap();
        assert_relative_eq!(sinxx.gain(&q) as f64, 19.0, epsilon = 0.1);
    }

    #[test]
    fn deep_null_is_rescaled_toward_first_side_lobe() {
        let sinxx = SinXX::new();
        let q = GainQuery::builder()
            .ref_gain(22.0_f32)
            .hbw(0.2_f64)
            .vbw(0.2_f64)
            .azim(0.229_f64) // sinc(1.0) null in normalized x
            .first_side_lobe(-10.0_f32)
            .build()
            .unwrap();
        // the pinned floor keeps gain well above the true sinc null
        assert!(sinxx.gain(&q) > -50.0);
    }
}
