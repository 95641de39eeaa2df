//! Pattern variants backed by an on-disk table (C5).
//!
//! Each submodule wraps one [`antenna_formats::parsers`] output in a type
//! implementing [`crate::traits::PatternGain`], adding the query-time rules
//! (azimuth/elevation combination, polarity channel selection, frequency
//! interpolation) a bare table doesn't know about.

pub mod bilinear;
pub mod cruise;
pub mod eznec;
pub mod monopulse;
pub mod nsma;
pub mod pat;
pub mod rel;
pub mod xfdtd;

pub use bilinear::BiLinear;
pub use cruise::Cruise;
pub use eznec::Eznec;
pub use monopulse::Monopulse;
pub use nsma::Nsma;
pub use pat::Pat;
pub use rel::Rel;
pub use xfdtd::Xfdtd;

/// Locate `freq`'s bracketing pair of indices in an ascending frequency
/// axis, plus the interpolation fraction between them. `None` means `freq`
/// falls outside `[freq_axis[0], freq_axis[last]]` — the caller should
/// surface [`crate::error::QueryError::UnsupportedFrequency`].
pub(crate) fn freq_bracket(freq_axis: &[f64], freq: f64) -> Option<(usize, usize, f64)> {
    let n = freq_axis.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some((0, 0, 0.0));
    }
    let (lo, hi) = (freq_axis[0], freq_axis[n - 1]);
    if freq < lo || freq > hi {
        return None;
    }
    match freq_axis.binary_search_by(|f| f.partial_cmp(&freq).expect("freq axis must not be NaN")) {
        Ok(idx) => Some((idx, idx, 0.0)),
        Err(idx) => {
            let (i0, i1) = (idx - 1, idx);
            let t = (freq - freq_axis[i0]) / (freq_axis[i1] - freq_axis[i0]);
            Some((i0, i1, t))
        }
    }
}
