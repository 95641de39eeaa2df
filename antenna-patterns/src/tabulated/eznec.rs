//! EZNEC-backed pattern: elevation-sliced azimuth cuts, each carrying
//! vertical/horizontal/total-power gain columns. [`Table2D::lookup`]
//! already does exactly what §4.4 describes (interpolate each bracketing
//! elevation slice's azimuth table, then interpolate the two slices), so
//! this module's only job is picking which column a query's polarity
//! wants.

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::polarity::Polarity;
use crate::query::GainQuery;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use antenna_formats::parsers::eznec::EznecTable;
use antenna_formats::table::PolarizedSample;

#[derive(Debug)]
pub struct Eznec {
    table: EznecTable,
    cache: MinMaxCache,
}

impl Eznec {
    pub fn new(table: EznecTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }

    /// Pick the column matching `polarity`. Circular and unresolved
    /// polarities fall back to the total-power column, the one EZNEC
    /// column that makes sense regardless of feed polarization.
    fn column(sample: PolarizedSample, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Vertical => sample.v_db,
            Polarity::Horizontal => sample.h_db,
            _ => sample.tot_db,
        }
    }
}

impl PatternGain for Eznec {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let sample = self.table.grid.lookup(elev, azim);
        let db = Self::column(sample, query.polarity);
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
                let db = Self::column(sample, query.polarity);
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

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_formats::parsers::eznec;
    use approx::assert_relative_eq;

    const FIXTURE: &str = "\
CONVENTION MATH
2
ELEVATION -5 3
-10 -6.0 -3.0 -2.0
0 -3.0 0.0 1.0
10 -6.0 -3.0 -2.0
ELEVATION 5 3
-10 -9.0 -6.0 -5.0
0 -6.0 -3.0 -2.0
10 -9.0 -6.0 -5.0
";

    fn table() -> EznecTable {
        eznec::parse(FIXTURE).unwrap()
    }

    #[test]
    fn horizontal_polarity_selects_h_column() {
        let pattern = Eznec::new(table());
        let q = GainQuery::builder()
            .ref_gain(0.0_f32)
            .elev((-5f64).to_radians())
            .polarity(Polarity::Horizontal)
            .build()
            .unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn unknown_polarity_selects_total_column() {
        let pattern = Eznec::new(table());
        let q = GainQuery::builder()
            .ref_gain(0.0_f32)
            .elev((-5f64).to_radians())
            .polarity(Polarity::Unknown)
            .build()
            .unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn interpolates_between_elevation_slices() {
        let pattern = Eznec::new(table());
        let q = GainQuery::builder()
            .ref_gain(0.0_f32)
            .elev(0.0_f64) // halfway between -5 and +5 deg slices
            .polarity(Polarity::Horizontal)
            .build()
            .unwrap();
        // h_db at boresight az is 0.0 at -5 deg and -3.0 at +5 deg.
        assert_relative_eq!(pattern.gain(&q) as f64, -1.5, epsilon = 1e-6);
    }
}
