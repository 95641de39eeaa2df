//! NSMA-backed pattern: up to eight named `{HH, HV, VV, VH} x {AZ, EL}`
//! channels, routed by the query's [`Polarity`].
//!
//! Co-polarized queries (`Horizontal`, `Vertical`) select a single
//! channel. Cross-polarized queries (`HorzVert`, `VertHorz`) are resolved
//! per the design decision in `DESIGN.md`: the source's exact combining
//! arithmetic did not survive retrieval, so this implementation combines
//! the co-pol and cross-pol channel as a power sum,
//! `10*log10(db2lin(co) + db2lin(cross))`, matching the one combination
//! rule this format family documents unambiguously (XFDTD's theta/phi
//! combine, §4.4). Polarities NSMA has no channel for (`RightCircular`,
//! `LeftCircular`, `Unknown`) fall back to the horizontal co-pol channel.

use crate::cache::{MinMaxCache, MinMaxCacheKey};
use crate::error::QueryError;
use crate::polarity::Polarity;
use crate::query::{combine_az_el, GainQuery};
use crate::traits::PatternGain;
use antenna_formats::angle::{clamp_small_db, db2lin, lin2db, SMALL_DB};
use antenna_formats::parsers::nsma::{NsmaTable, PlaneAxis, PolChannel};
use antenna_formats::table::InterpTable;
use std::cell::Cell;

#[derive(Debug)]
pub struct Nsma {
    table: NsmaTable,
    cache: MinMaxCache,
    last_error: Cell<Option<QueryError>>,
}

impl Nsma {
    pub fn new(table: NsmaTable) -> Self {
        Self {
            table,
            cache: MinMaxCache::new(),
            last_error: Cell::new(None),
        }
    }

    /// The channel(s) a query's polarity routes to. A co-pol query
    /// resolves to one channel; a cross-pol query resolves to a
    /// `(co, cross)` pair to be power-combined.
    fn channels_for(polarity: Polarity) -> &'static [PolChannel] {
        match polarity {
            Polarity::Vertical => &[PolChannel::Vv],
            Polarity::HorzVert => &[PolChannel::Hh, PolChannel::Hv],
            Polarity::VertHorz => &[PolChannel::Vv, PolChannel::Vh],
            Polarity::Horizontal
            | Polarity::RightCircular
            | Polarity::LeftCircular
            | Polarity::Unknown => &[PolChannel::Hh],
        }
    }

    fn channel_table(&self, channel: PolChannel, axis: PlaneAxis) -> Option<&InterpTable<f64>> {
        self.table.channel(channel, axis)
    }

    /// Combined gain (dB, before `refGain`) for one channel: az/el looked
    /// up independently and combined per §4.6. `None` if either axis
    /// table for this channel is missing.
    fn channel_gain_db(&self, channel: PolChannel, azim: f64, elev: f64, weighting: bool) -> Option<f64> {
        let az = self.channel_table(channel, PlaneAxis::Az)?;
        let el = self.channel_table(channel, PlaneAxis::El)?;
        Some(combine_az_el(az.lookup(azim), el.lookup(elev), azim, elev, weighting))
    }

    fn channel_extremes_db(&self, channel: PolChannel) -> Option<(f64, f64)> {
        let az = self.channel_table(channel, PlaneAxis::Az)?;
        let el = self.channel_table(channel, PlaneAxis::El)?;
        let (az_min, az_max) = az.extremes()?;
        let (el_min, el_max) = el.extremes()?;
        Some((az_min + el_min, az_max + el_max))
    }

    /// Power-combine a set of per-channel dB gains: `10*log10(sum(db2lin))`.
    /// A single channel passes through unchanged.
    fn power_combine(values_db: &[f64]) -> f64 {
        if values_db.len() == 1 {
            return values_db[0];
        }
        lin2db(values_db.iter().map(|&db| db2lin(db)).sum())
    }
}

impl PatternGain for Nsma {
    fn gain(&self, query: &GainQuery) -> f32 {
        let azim = query.normalized_azim();
        let elev = query.normalized_elev();
        let channels = Self::channels_for(query.polarity);

        let mut per_channel = Vec::with_capacity(channels.len());
        for &ch in channels {
            match self.channel_gain_db(ch, azim, elev, query.weighting) {
                Some(db) => per_channel.push(db),
                None => {
                    self.last_error.set(Some(QueryError::ChannelMissing));
                    tracing::warn!(?ch, "NSMA channel missing for requested polarization");
                    return SMALL_DB;
                }
            }
        }
        self.last_error.set(None);

        let combined = Self::power_combine(&per_channel);
        clamp_small_db((query.ref_gain as f64 + combined) as f32)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        let key = MinMaxCacheKey::from_query(query);
        if let Some(cached) = self.cache.get(key) {
            return cached;
        }
        let channels = Self::channels_for(query.polarity);
        let mut mins = Vec::with_capacity(channels.len());
        let mut maxs = Vec::with_capacity(channels.len());
        for &ch in channels {
            match self.channel_extremes_db(ch) {
                Some((lo, hi)) => {
                    mins.push(lo);
                    maxs.push(hi);
                }
                None => {
                    let result = (SMALL_DB, SMALL_DB);
                    self.cache.put(key, result.0, result.1);
                    return result;
                }
            }
        }
        let min = clamp_small_db((query.ref_gain as f64 + Self::power_combine(&mins)) as f32);
        let max = clamp_small_db((query.ref_gain as f64 + Self::power_combine(&maxs)) as f32);
        self.cache.put(key, min, max);
        (min, max)
    }

    fn last_error(&self) -> Option<QueryError> {
        self.last_error.get()
    }
}
