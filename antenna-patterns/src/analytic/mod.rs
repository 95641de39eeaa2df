//! Closed-form analytic gain models (C4).
//!
//! Each model computes `refGain + shape(azim, elev, hbw, vbw, sideLobe)` in
//! dB with no table scan; min/max are derived analytically rather than by
//! sampling, since the shape function's extrema are known in closed form.

pub mod cscsq;
pub mod gauss;
pub mod omni;
pub mod pedestal;
pub mod sinxx;

pub use cscsq::CscSq;
pub use gauss::Gauss;
pub use omni::Omni;
pub use pedestal::Pedestal;
pub use sinxx::SinXX;

use crate::query::GainQuery;
use antenna_formats::angle::clamp_small_db;

/// Default min/max rule shared by every analytic model except Omni
/// (§4.3): `max = refGain`, `min = max(backLobe, firstSideLobe - 60dB)`.
pub(crate) fn default_min_max(query: &GainQuery, default_first_side_lobe: f32, default_back_lobe: f32) -> (f32, f32) {
    let first_side_lobe = query.resolved_first_side_lobe(default_first_side_lobe);
    let back_lobe = query.resolved_back_lobe(default_back_lobe);
    let min = back_lobe.max(first_side_lobe - 60.0);
    (clamp_small_db(min), query.ref_gain)
}

/// Clamp a computed gain to at least `backLobe` once the look direction is
/// past the azimuth horizon (`|azim| > pi/2`), per §4.3's back-lobe floor.
pub(crate) fn apply_back_lobe_floor(gain_db: f64, azim: f64, back_lobe: f32) -> f64 {
    if azim.abs() > std::f64::consts::FRAC_PI_2 {
        gain_db.max(back_lobe as f64)
    } else {
        gain_db
    }
}
