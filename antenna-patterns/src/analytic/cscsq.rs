//! Cosecant-squared elevation fan over an omnidirectional azimuth pattern.

use crate::analytic::{apply_back_lobe_floor, default_min_max};
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;

const DEFAULT_FIRST_SIDE_LOBE_DB: f32 = -20.0;
const DEFAULT_BACK_LOBE_DB: f32 = -30.0;

/// Flat at `refGain` from boresight out to `el0`, then falls as
/// `20*log10(sin(el0)/sin(el))` out to `el1`, where a csc-squared antenna
/// fan trades elevation coverage for gain. `el0`/`el1` default to
/// `hbw/4` and `pi/2` (§4.3) but can be set explicitly.
#[derive(Debug, Clone, Copy)]
pub struct CscSq {
    el0: Option<f64>,
    el1: Option<f64>,
}

impl CscSq {
    pub fn new() -> Self {
        Self { el0: None, el1: None }
    }

    pub fn with_breakpoints(el0: f64, el1: f64) -> Self {
        Self {
            el0: Some(el0),
            el1: Some(el1),
        }
    }

    fn breakpoints(&self, hbw: f64) -> (f64, f64) {
        let el0 = self.el0.unwrap_or(hbw / 4.0).max(f64::EPSILON);
        let el1 = self.el1.unwrap_or(std::f64::consts::FRAC_PI_2).max(el0 + f64::EPSILON);
        (el0, el1)
    }
}

impl Default for CscSq {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGain for CscSq {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let back_lobe = query.resolved_back_lobe(DEFAULT_BACK_LOBE_DB);

        let (el0, el1) = self.breakpoints(query.hbw);
        let abs_el = elev.abs().min(el1);
        let shape = if abs_el <= el0 {
            0.0
        } else {
            20.0 * (el0.sin() / abs_el.sin().max(f64::EPSILON)).log10()
        };

        let gain = query.ref_gain as f64 + shape;
        let gain = apply_back_lobe_floor(gain, azim, back_lobe);
        clamp_small_db(gain as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        default_min_max(query, DEFAULT_FIRST_SIDE_LOBE_DB, DEFAULT_BACK_LOBE_DB)
    }
}
