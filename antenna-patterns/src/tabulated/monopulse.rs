//! Monopulse-backed pattern: sum/difference complex `(az, el)` grids,
//! frequency-interpolated, with the one format in this crate that rejects
//! an out-of-range frequency outright (§4.4) rather than clamping to the
//! nearest row.

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::error::QueryError;
use crate::query::GainQuery;
use crate::tabulated::freq_bracket;
use crate::traits::PatternGain;
use antenna_formats::angle::{clamp_small_db, SMALL_DB};
use antenna_formats::parsers::monopulse::{MonopulseBlock, MonopulseTable};
use antenna_formats::table::{Complex, Lerp};
use std::cell::Cell;

#[derive(Debug)]
pub struct Monopulse {
    table: MonopulseTable,
    cache: MinMaxCache,
    last_error: Cell<Option<QueryError>>,
}

impl Monopulse {
    pub fn new(table: MonopulseTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
            last_error: Cell::new(None),
        }
    }

    fn block(&self, delta: bool) -> &MonopulseBlock {
        if delta { &self.table.diff } else { &self.table.sum }
    }

    fn block_extremes_db(block: &MonopulseBlock, i0: usize, i1: usize) -> (f32, f32) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for grid in [&block.grids[i0], &block.grids[i1]] {
            for row in grid.row_tables() {
                for sample in row.values() {
                    let db = sample.magnitude_db();
                    lo = lo.min(db);
                    hi = hi.max(db);
                }
            }
        }
        (lo as f32, hi as f32)
    }
}

impl PatternGain for Monopulse {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let block = self.block(query.delta);
        let (lo, hi) = block.freq_bounds();

        if query.freq < lo || query.freq > hi {
            self.last_error.set(Some(QueryError::UnsupportedFrequency));
            tracing::warn!(
                freq_hz = query.freq,
                min_hz = lo,
                max_hz = hi,
                "Monopulse query frequency outside supported range"
            );
            return SMALL_DB;
        }
        self.last_error.set(None);

        let (i0, i1, t) =
            freq_bracket(&block.freq_axis, query.freq).expect("frequency already bounds-checked above");
        let c0 = block.grids[i0].lookup(azim, elev);
        let c1 = block.grids[i1].lookup(azim, elev);
        let c = Complex::lerp(c0, c1, t);
        clamp_small_db((query.ref_gain as f64 + c.magnitude_db()) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let block = self.block(query.delta);
        let (lo, hi) = block.freq_bounds();
        if query.freq < lo || query.freq > hi {
            let result = (SMALL_DB, SMALL_DB);
            self.cache.put(key, result.0, result.1);
            return result;
        }
        let (i0, i1, _) =
            freq_bracket(&block.freq_axis, query.freq).expect("frequency already bounds-checked above");
        let (db_min, db_max) = Self::block_extremes_db(block, i0, i1);
        let min = clamp_small_db(query.ref_gain + db_min);
        let max = clamp_small_db(query.ref_gain + db_max);
        self.cache.put(key, min, max);
        (min, max)
    }

    fn last_error(&self) -> Option<QueryError> {
        self.last_error.get()
    }
}
