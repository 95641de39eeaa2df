//! Single-slot min/max gain cache (C7).
//!
//! Unlike the teacher's hash-map-backed [`FilterCache`], a pattern's
//! min/max result depends on so few inputs (beamwidths, polarity,
//! frequency, the monopulse delta selector) that a single remembered entry
//! covers the common case of a host re-querying the same beamwidth
//! repeatedly — no eviction policy is needed.

use crate::polarity::Polarity;
use std::cell::Cell;

/// The subset of a [`crate::query::GainQuery`] that determines a pattern's
/// min/max gain, used to decide whether a cached result is still valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxCacheKey {
    pub hbw: f64,
    pub vbw: f64,
    pub polarity: Polarity,
    pub freq: f64,
    pub delta: bool,
}

impl MinMaxCacheKey {
    pub fn from_query(query: &crate::query::GainQuery) -> Self {
        Self {
            hbw: query.hbw,
            vbw: query.vbw,
            polarity: query.polarity,
            freq: query.freq,
            delta: query.delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MinMaxCacheEntry {
    key: MinMaxCacheKey,
    min: f32,
    max: f32,
}

/// A pattern's single-slot min/max cache. Interior-mutable so `min_max_gain`
/// can update it through a shared `&self` receiver, matching the
/// "immutable apart from the min/max cache" lifecycle invariant (§3).
#[derive(Debug, Default)]
pub struct MinMaxCache {
    entry: Cell<Option<MinMaxCacheEntry>>,
}

impl MinMaxCache {
    pub fn new() -> Self {
        Self {
            entry: Cell::new(None),
        }
    }

    /// Return the cached `(min, max)` for `key` if present, else `None`.
    pub fn get(&self, key: MinMaxCacheKey) -> Option<(f32, f32)> {
        let hit = match self.entry.get() {
            Some(entry) if entry.key == key => Some((entry.min, entry.max)),
            _ => None,
        };
        if hit.is_some() {
            tracing::trace!(?key, "min/max cache hit");
        } else {
            tracing::trace!(?key, "min/max cache miss");
        }
        hit
    }

    /// Replace the cached entry with a freshly computed `(min, max)`.
    pub fn put(&self, key: MinMaxCacheKey, min: f32, max: f32) {
        self.entry.set(Some(MinMaxCacheEntry { key, min, max }));
    }
}
