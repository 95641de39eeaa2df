//! Omnidirectional pattern: constant gain in every direction.

use crate::query::GainQuery;
use crate::traits::PatternGain;

/// An isotropic-equivalent radiator: `shape(az, el) = 0` everywhere, so
/// `gain(q) == q.ref_gain` for any direction. Unlike the other analytic
/// models, Omni has no back-lobe floor to apply — it is constant by
/// definition (§8's testable property).
#[derive(Debug, Clone, Copy, Default)]
pub struct Omni;

impl Omni {
    pub fn new() -> Self {
        Self
    }
}

impl PatternGain for Omni {
    fn gain(&self, query: &GainQuery) -> f32 {
        query.ref_gain
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        (query.ref_gain, query.ref_gain)
    }
}
