//! On-disk pattern file parsers (C3).
//!
//! Each submodule owns exactly one file format and exposes a `parse`
//! function returning that format's own table type — there is no shared
//! parsed-file enum here, that dispatch lives in `antenna-patterns` where
//! the format is paired with a gain-query model.

pub mod bilinear;
pub mod cruise;
pub mod eznec;
pub mod monopulse;
pub mod nsma;
pub mod pat;
pub mod rel;
pub mod text;
pub mod xfdtd;
