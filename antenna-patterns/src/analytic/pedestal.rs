//! Flat-top "pedestal" pattern: constant at `refGain` inside the
//! beamwidth box, then a linear (in dB) falloff to `backLobe` by the
//! azimuth/elevation horizon.

use crate::analytic::default_min_max;
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use std::f64::consts::PI;

const DEFAULT_FIRST_SIDE_LOBE_DB: f32 = -20.0;
const DEFAULT_BACK_LOBE_DB: f32 = -30.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pedestal;

impl Pedestal {
    pub fn new() -> Self {
        Self
    }

    /// Fraction of the way from the beamwidth edge to `pi`, clamped to
    /// `[0, 1]`, used to interpolate linearly (in dB) toward `backLobe`.
    fn falloff_fraction(angle: f64, half_bw: f64) -> f64 {
        let half_bw = half_bw.max(f64::EPSILON);
        if angle.abs() <= half_bw {
            0.0
        } else {
            ((angle.abs() - half_bw) / (PI - half_bw).max(f64::EPSILON)).clamp(0.0, 1.0)
        }
    }
}

impl PatternGain for Pedestal {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let back_lobe = query.resolved_back_lobe(DEFAULT_BACK_LOBE_DB) as f64;

        let frac_az = Self::falloff_fraction(azim, query.hbw / 2.0);
        let frac_el = Self::falloff_fraction(elev, query.vbw / 2.0);
        let frac = frac_az.max(frac_el);

        let gain = query.ref_gain as f64 + frac * (back_lobe - query.ref_gain as f64);
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
    fn flat_inside_beamwidth_box() {
        let pedestal = Pedestal::new();
        let q = GainQuery::builder()
            .ref_gain(15.0_f32)
            .hbw(0.2_f64)
            .vbw(0.2_f64)
            .azim(0.05_f64)
            .elev(-0.05_f64)
            .build()
            .unwrap();
        assert_relative_eq!(pedestal.gain(&q) as f64, 15.0, epsilon = 1e-6);
    }

    #[test]
    fn reaches_back_lobe_at_horizon() {
        let pedestal = Pedestal::new();
        let q = GainQuery::builder()
            .ref_gain(15.0_f32)
            .hbw(0.2_f64)
            .vbw(0.2_f64)
            .azim(PI)
            .back_lobe(-12.0_f32)
            .build()
            .unwrap();
        assert_relative_eq!(pedestal.gain(&q) as f64, -12.0, epsilon = 1e-3);
    }

    #[test]
    fn falls_off_monotonically_beyond_box() {
        let pedestal = Pedestal::new();
        let base = GainQuery::builder().ref_gain(15.0_f32).hbw(0.2_f64).vbw(0.2_f64);
        let near = base.clone().azim(0.3_f64).build().unwrap();
        let far = base.clone().azim(1.5_f64).build().unwrap();
        assert!(pedestal.gain(&near) > pedestal.gain(&far));
    }
}
