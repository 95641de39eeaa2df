//! Gain query parameters.

use crate::polarity::Polarity;
use antenna_formats::angle::{SMALL_DB, wrap_pi, wrap_pi_over_2};
use derive_builder::Builder;

/// Boresight regularization epsilon, in radians, below which both `|az|`
/// and `|el|` are treated as "exactly at boresight" for weighting purposes
/// (§4.6's degenerate-case fallback).
pub const BORESIGHT_EPS: f64 = 1e-9;

/// Inputs to a single gain computation. Built via [`GainQueryBuilder`]
/// rather than a public-field struct literal, so optional fields (`freq`,
/// `firstSideLobe`, `backLobe`) can default sensibly without every caller
/// repeating them.
#[derive(Debug, Clone, Copy, Builder)]
#[builder(setter(into), default)]
pub struct GainQuery {
    /// Look-direction azimuth, radians. Normalized to `(-pi, pi]` on read.
    pub azim: f64,
    /// Look-direction elevation, radians. Normalized to `[-pi/2, pi/2]` on
    /// read (reflecting past the poles).
    pub elev: f64,
    pub polarity: Polarity,
    /// Half-power azimuth beamwidth, radians.
    pub hbw: f64,
    /// Half-power elevation beamwidth, radians.
    pub vbw: f64,
    /// Caller's maximum-gain reference, dB.
    pub ref_gain: f32,
    /// First side-lobe level, dB. `SMALL_DB` means "unset, use the
    /// model's own default".
    pub first_side_lobe: f32,
    /// Back-lobe level, dB. `SMALL_DB` means "unset, use the model's own
    /// default".
    pub back_lobe: f32,
    /// Query frequency, Hz. Required by CRUISE, Monopulse and BiLinear.
    pub freq: f64,
    /// When true, blend azimuth/elevation samples by angular distance from
    /// boresight instead of simply adding them (§4.6).
    pub weighting: bool,
    /// Monopulse-only: false selects the sum channel, true the difference
    /// channel.
    pub delta: bool,
}

impl Default for GainQuery {
    fn default() -> Self {
        Self {
            azim: 0.0,
            elev: 0.0,
            polarity: Polarity::Unknown,
            hbw: 0.0,
            vbw: 0.0,
            ref_gain: 0.0,
            first_side_lobe: SMALL_DB,
            back_lobe: SMALL_DB,
            freq: 0.0,
            weighting: false,
            delta: false,
        }
    }
}

impl GainQuery {
    pub fn builder() -> GainQueryBuilder {
        GainQueryBuilder::default()
    }

    /// Azimuth normalized into `(-pi, pi]`.
    pub fn normalized_azim(&self) -> f64 {
        wrap_pi(self.azim)
    }

    /// Elevation normalized into `[-pi/2, pi/2]`.
    pub fn normalized_elev(&self) -> f64 {
        wrap_pi_over_2(self.elev)
    }

    /// `firstSideLobe`, resolved against `default` when unset (`SMALL_DB`
    /// or less negative than the caller intended).
    pub fn resolved_first_side_lobe(&self, default: f32) -> f32 {
        if self.first_side_lobe <= SMALL_DB {
            default
        } else {
            self.first_side_lobe
        }
    }

    /// `backLobe`, resolved against `default` when unset.
    pub fn resolved_back_lobe(&self, default: f32) -> f32 {
        if self.back_lobe <= SMALL_DB {
            default
        } else {
            self.back_lobe
        }
    }
}

/// Combine an azimuth-plane and elevation-plane gain sample (both dB) per
/// §4.6: additive when unweighted, angular-distance-weighted otherwise,
/// falling back to unweighted addition at boresight where the weighting
/// ratio is undefined.
pub fn combine_az_el(gain_az_db: f64, gain_el_db: f64, azim: f64, elev: f64, weighting: bool) -> f64 {
    if !weighting {
        return gain_az_db + gain_el_db;
    }
    if azim.abs() < BORESIGHT_EPS && elev.abs() < BORESIGHT_EPS {
        return gain_az_db + gain_el_db;
    }
    const EPS: f64 = 1e-9;
    let w_a = elev.abs() / (azim.abs() + elev.abs() + EPS);
    let w_e = 1.0 - w_a;
    w_a * gain_az_db + w_e * gain_el_db
}
