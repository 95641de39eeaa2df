//! Gain-query engine over analytic and tabulated antenna patterns.
//!
//! Built on [`antenna_formats`]'s parsers and interpolation tables, this
//! crate adds the query-time semantics a bare parsed table doesn't carry:
//! azimuth/elevation combination, polarization channel routing, frequency
//! interpolation, and the min/max gain cache. [`factory::load_pattern_file`]
//! is the host's entry point for on-disk patterns; the analytic models are
//! constructed directly via [`handle::PatternHandle`]'s `new_*` methods.

pub mod analytic;
pub mod cache;
pub mod error;
pub mod factory;
pub mod handle;
pub mod polarity;
pub mod query;
pub mod tabulated;
pub mod traits;

pub use error::{PatternError, QueryError, Result};
pub use factory::load_pattern_file;
pub use handle::{antenna_pattern_type_from_name, antenna_pattern_type_name, PatternHandle, PatternType};
pub use polarity::Polarity;
pub use query::{GainQuery, GainQueryBuilder};
pub use traits::PatternGain;
