//! REL-backed pattern: like PAT but the stored tables are explicitly
//! relative (maximum stored gain is 0 dB), so there is no symmetry fold
//! and no beamwidth-unit conversion to worry about at query time.

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::query::{combine_az_el, GainQuery};
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use antenna_formats::parsers::rel::RelTable;

#[derive(Debug)]
pub struct Rel {
    table: RelTable,
    cache: MinMaxCache,
}

impl Rel {
    pub fn new(table: RelTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }
}

impl PatternGain for Rel {
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
        let (az_min, az_max) = self.table.azim.extremes().unwrap_or((0.0, 0.0));
        let (el_min, el_max) = self.table.elev.extremes().unwrap_or((0.0, 0.0));
        let min = clamp_small_db((query.ref_gain as f64 + az_min + el_min) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + az_max + el_max) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_formats::parsers::rel;
    use approx::assert_relative_eq;

    const FIXTURE: &str = "\
3 3
-10 -3.0
0 0.0
10 -3.0
-10 -6.0
0 0.0
10 -6.0
";

    fn table() -> RelTable {
        rel::parse(FIXTURE).unwrap()
    }

    #[test]
    fn boresight_gain_equals_ref_gain() {
        let pattern = Rel::new(table());
        let q = GainQuery::builder().ref_gain(40.0_f32).build().unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 40.0, epsilon = 1e-6);
    }

    #[test]
    fn off_axis_applies_relative_offset() {
        let pattern = Rel::new(table());
        let q = GainQuery::builder()
            .ref_gain(40.0_f32)
            .azim(10.0_f64.to_radians())
            .elev(10.0_f64.to_radians())
            .build()
            .unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 40.0 - 3.0 - 6.0, epsilon = 1e-6);
    }

    #[test]
    fn min_max_caches_across_calls() {
        let pattern = Rel::new(table());
        let q = GainQuery::builder().ref_gain(40.0_f32).build().unwrap();
        let (min1, max1) = pattern.min_max_gain(&q);
        let (min2, max2) = pattern.min_max_gain(&q);
        assert_eq!((min1, max1), (min2, max2));
        assert_eq!(max1, 40.0);
    }
}
