//! PAT-backed pattern: independent azimuth/elevation cuts combined per
//! [`combine_az_el`].

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::query::{combine_az_el, GainQuery};
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use antenna_formats::parsers::pat::PatTable;

#[derive(Debug)]
pub struct Pat {
    table: PatTable,
    cache: MinMaxCache,
}

impl Pat {
    pub fn new(table: PatTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }

    /// Direct access to the underlying table, for the programmatic
    /// construction mutators (`setAzimSample`, `setSymmetry`, ...) on
    /// [`crate::handle::PatternHandle`] (§6).
    pub fn table_mut(&mut self) -> &mut PatTable {
        &mut self.table
    }
}

impl PatternGain for Pat {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let az_db = self.table.azim.lookup(azim);
        let el_db = self.table.elev.lookup(elev);
        let combined = combine_az_el(az_db, el_db, azim, elev, query.weighting);
        clamp_small_db((query.ref_gain as f64 + combined) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let (az_min, az_max) = self.table.azim.inner().extremes().unwrap_or((0.0, 0.0));
        let (el_min, el_max) = self.table.elev.inner().extremes().unwrap_or((0.0, 0.0));
        let min = clamp_small_db((query.ref_gain as f64 + az_min + el_min) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + az_max + el_max) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }
}
