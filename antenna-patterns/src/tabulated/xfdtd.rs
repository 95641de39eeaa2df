//! XFDTD-backed pattern: a dense `(theta, phi)` gain grid, converted to
//! the library's `(az, el)` convention at query time via `az = phi`,
//! `el = pi/2 - theta` (§4.4).
//!
//! The source's polarity labels are `Theta-polar`/`Phi-polar`, which this
//! crate's shared [`Polarity`] enum does not carry directly; this
//! implementation maps `Vertical` to theta-polarized and `Horizontal` to
//! phi-polarized (the elevation/azimuth analogues of theta/phi), and
//! combines both components for every other polarity (circular, cross-pol,
//! unknown) using the format's own documented combination rule.

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::polarity::Polarity;
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::{clamp_small_db, db2lin, lin2db, wrap_2pi};
use antenna_formats::parsers::xfdtd::XfdtdTable;
use antenna_formats::table::ThetaPhiSample;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug)]
pub struct Xfdtd {
    table: XfdtdTable,
    cache: MinMaxCache,
}

impl Xfdtd {
    pub fn new(table: XfdtdTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }

    fn theta_phi(azim: f64, elev: f64) -> (f64, f64) {
        ((FRAC_PI_2 - elev).clamp(0.0, std::f64::consts::PI), wrap_2pi(azim))
    }

    fn column_db(sample: ThetaPhiSample, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Vertical => sample.gain_theta_db,
            Polarity::Horizontal => sample.gain_phi_db,
            _ => lin2db(db2lin(sample.gain_theta_db) + db2lin(sample.gain_phi_db)),
        }
    }
}

impl PatternGain for Xfdtd {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let (theta, phi) = Self::theta_phi(azim, elev);
        let sample = self.table.grid.lookup(theta, phi);
        let db = Self::column_db(sample, query.polarity);
        clamp_small_db((query.ref_gain as f64 + db) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in self.table.grid.row_tables() {
            for sample in row.values() {
                let db = Self::column_db(sample, query.polarity);
                lo = lo.min(db);
                hi = hi.max(db);
            }
        }
        let min = clamp_small_db((query.ref_gain as f64 + lo) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + hi) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }
}
