//! CRUISE-backed pattern: azimuth/elevation voltage-gain grids sampled at
//! a handful of frequencies, clamped (never rejected) when a query falls
//! outside the stored frequency axis (§4.4's "clamp to nearest" rule,
//! unlike Monopulse's hard `UnsupportedFrequency`).

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::query::{combine_az_el, GainQuery};
use crate::tabulated::freq_bracket;
use crate::traits::PatternGain;
use antenna_formats::angle::clamp_small_db;
use antenna_formats::parsers::cruise::{CruiseAxis, CruiseTable};
use antenna_formats::table::Lerp;

#[derive(Debug)]
pub struct Cruise {
    table: CruiseTable,
    cache: MinMaxCache,
}

impl Cruise {
    pub fn new(table: CruiseTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
        }
    }

    /// Clamp `freq` into `axis`'s supported range, then interpolate the
    /// voltage gain at `angle` across the bracketing frequency rows.
    /// Voltage, not power, is the quantity linear in the frequency axis
    /// (§4.4); squaring to power and converting to dB happens after this.
    fn voltage_at(axis: &CruiseAxis, angle: f64, freq: f64) -> f64 {
        let (lo, hi) = axis.freq_bounds();
        let clamped = freq.clamp(lo, hi);
        let (i0, i1, t) = freq_bracket(&axis.freq_axis, clamped)
            .expect("clamped frequency always falls within the axis bounds");
        let v0 = axis.rows[i0].lookup(angle);
        let v1 = axis.rows[i1].lookup(angle);
        f64::lerp(v0, v1, t)
    }

    fn voltage_extremes(axis: &CruiseAxis) -> (f64, f64) {
        axis.rows
            .iter()
            .filter_map(|row| row.extremes())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (rlo, rhi)| {
                (lo.min(rlo), hi.max(rhi))
            })
    }
}

/// Voltage gain to power gain in dB: `20 * log10(|v|)`.
fn voltage_to_db(v: f64) -> f64 {
    20.0 * v.abs().max(1e-15).log10()
}

impl PatternGain for Cruise {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();

        let az_db = voltage_to_db(Self::voltage_at(&self.table.azim, azim, query.freq));
        let el_db = voltage_to_db(Self::voltage_at(&self.table.elev, elev, query.freq));
        let combined = combine_az_el(az_db, el_db, azim, elev, query.weighting);
        clamp_small_db((query.ref_gain as f64 + combined) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let (az_v_min, az_v_max) = Self::voltage_extremes(&self.table.azim);
        let (el_v_min, el_v_max) = Self::voltage_extremes(&self.table.elev);
        let az_min = voltage_to_db(az_v_min);
        let az_max = voltage_to_db(az_v_max);
        let el_min = voltage_to_db(el_v_min);
        let el_max = voltage_to_db(el_v_max);
        let min = clamp_small_db((query.ref_gain as f64 + az_min + el_min) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + az_max + el_max) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_formats::parsers::cruise;
    use approx::assert_relative_eq;

    const FIXTURE: &str = "\
AZIMUTH
3 5
-10 10
8.0 10.0 12.0 14.0 16.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
ELEVATION
3 5
-5 5
8.0 10.0 12.0 14.0 16.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
1.0 1.0 1.0
";

    fn table() -> antenna_formats::parsers::cruise::CruiseTable {
        cruise::parse(FIXTURE).unwrap()
    }

    #[test]
    fn identical_voltage_rows_give_identical_gain_across_frequency() {
        let pattern = Cruise::new(table());
        let base = GainQuery::builder().ref_gain(0.0_f32);
        let at_8 = base.clone().freq(8.0e9_f64).build().unwrap();
        let at_9 = base.clone().freq(9.0e9_f64).build().unwrap();
        let at_10 = base.clone().freq(10.0e9_f64).build().unwrap();
        assert_relative_eq!(pattern.gain(&at_8) as f64, pattern.gain(&at_9) as f64, epsilon = 1e-6);
        assert_relative_eq!(pattern.gain(&at_9) as f64, pattern.gain(&at_10) as f64, epsilon = 1e-6);
    }

    #[test]
    fn out_of_range_frequency_clamps_rather_than_failing() {
        let pattern = Cruise::new(table());
        let inside = GainQuery::builder().ref_gain(0.0_f32).freq(8.0e9_f64).build().unwrap();
        let below = GainQuery::builder().ref_gain(0.0_f32).freq(1.0e9_f64).build().unwrap();
        assert_relative_eq!(pattern.gain(&inside) as f64, pattern.gain(&below) as f64, epsilon = 1e-6);
    }

    #[test]
    fn unity_voltage_everywhere_gives_zero_db_shape() {
        let pattern = Cruise::new(table());
        let q = GainQuery::builder().ref_gain(15.0_f32).freq(10.0e9_f64).build().unwrap();
        assert_relative_eq!(pattern.gain(&q) as f64, 15.0, epsilon = 1e-6);
    }
}
