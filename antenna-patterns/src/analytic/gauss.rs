//! Gaussian main-lobe pattern, tapered to the first side-lobe level beyond
//! the 3-dB contour.

use crate::analytic::{apply_back_lobe_floor, default_min_max};
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use std::f64::consts::LN_2;

/// Default first side-lobe and back-lobe levels used when a query leaves
/// them unset (`SMALL_DB`).
const DEFAULT_FIRST_SIDE_LOBE_DB: f32 = -20.0;
const DEFAULT_BACK_LOBE_DB: f32 = -30.0;

/// `shape(az, el) = -ln(2) * ((az/(hbw/2))^2 + (el/(vbw/2))^2)` out to the
/// contour where that expression equals -3 dB; beyond it, the shape tapers
/// linearly (in the squared-angle metric) to `firstSideLobe` over one more
/// contour-width, rather than discontinuously jumping there.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gauss;

impl Gauss {
    pub fn new() -> Self {
        Self
    }

    fn shape_db(azim: f64, elev: f64, hbw: f64, vbw: f64, first_side_lobe: f64) -> f64 {
        let half_hbw = (hbw / 2.0).max(f64::EPSILON);
        let half_vbw = (vbw / 2.0).max(f64::EPSILON);
        let m = (azim / half_hbw).powi(2) + (elev / half_vbw).powi(2);
        let contour = 3.0 / LN_2;
        if m <= contour {
            -LN_2 * m
        } else {
            let at_contour = -LN_2 * contour;
            let over = ((m - contour) / contour).min(1.0);
            at_contour + (first_side_lobe - at_contour) * over
        }
    }
}

impl PatternGain for Gauss {
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
