//! BiLinear-backed pattern: a single real-valued `(az, el)` grid per
//! frequency row, bilinear in angle and linear in frequency. Unlike
//! Monopulse, an out-of-range query frequency clamps to the nearest row
//! rather than failing (§4.4 draws that line at Monopulse specifically).

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::query::GainQuery;
use crate::tabulated::freq_bracket;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use antenna_formats::parsers::bilinear::BiLinearTable;
use antenna_formats::table::Lerp;

#[derive(Debug)]
pub struct BiLinear {
    table: BiLinearTable,
    cache: MinMaxCache,
}

impl BiLinear {
    pub fn new(table: BiLinearTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }

    fn gain_db_at(&self, azim: f64, elev: f64, freq: f64) -> f64 {
        let (lo, hi) = self.table.freq_bounds();
        let clamped = freq.clamp(lo, hi);
        let (i0, i1, t) = freq_bracket(&self.table.freq_axis, clamped)
            .expect("clamped frequency always falls within the axis bounds");
        let g0 = self.table.grids[i0].lookup(azim, elev);
        let g1 = self.table.grids[i1].lookup(azim, elev);
        f64::lerp(g0, g1, t)
    }
}

impl PatternGain for BiLinear {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let db = self.gain_db_at(azim, elev, query.freq);
        clamp_small_db((query.ref_gain as f64 + db) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let (lo, hi) = self.table.freq_bounds();
        let clamped = query.freq.clamp(lo, hi);
        let (i0, i1, _) = freq_bracket(&self.table.freq_axis, clamped)
            .expect("clamped frequency always falls within the axis bounds");

        let mut db_lo = f64::INFINITY;
        let mut db_hi = f64::NEG_INFINITY;
        for grid in [&self.table.grids[i0], &self.table.grids[i1]] {
            for row in grid.row_tables() {
                if let Some((rlo, rhi)) = row.extremes() {
                    db_lo = db_lo.min(rlo);
                    db_hi = db_hi.max(rhi);
                }
            }
        }
        let min = clamp_small_db((query.ref_gain as f64 + db_lo) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + db_hi) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_formats::parsers::bilinear;
    use approx::assert_relative_eq;

    const FIXTURE: &str = "\
2 2 2
-2 4
-2 4
9.0 11.0
0.0 -3.0
-3.0 -6.0
0.0 -3.0
-3.0 -6.0
";

    fn table() -> BiLinearTable {
        bilinear::parse(FIXTURE).unwrap()
    }

    #[test]
    fn boresight_matches_grid_sample() {
        let pattern = BiLinear::new(table());
        let q = GainQuery::builder().ref_gain(10.0_f32).freq(10.0e9_f64).build().unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn out_of_range_frequency_clamps_to_nearest_row() {
        let pattern = BiLinear::new(table());
        let at_min = GainQuery::builder().ref_gain(10.0_f32).freq(9.0e9_f64).build().unwrap();
        let below = GainQuery::builder().ref_gain(10.0_f32).freq(1.0e9_f64).build().unwrap();
        assert_relative_eq!(pattern.gain(&at_min) as f64, pattern.gain(&below) as f64, epsilon = 1e-6);
    }

    #[test]
    fn min_max_covers_stored_extremes() {
        let pattern = BiLinear::new(table());
        let q = GainQuery::builder().ref_gain(10.0_f32).freq(10.0e9_f64).build().unwrap();
        let (min, max) = pattern.min_max_gain(&q);
        assert_relative_eq!(max as f64, 10.0, epsilon = 1e-6);
        assert_relative_eq!(min as f64, 4.0, epsilon = 1e-6);
    }
}
