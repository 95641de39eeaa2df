//! Error types for pattern-file parsing.
//!
//! This module defines `FormatError`, used by every parser in [`crate::parsers`]
//! and by the table invariants in [`crate::table`]. It uses `thiserror` for
//! convenient error construction and implements the standard error traits for
//! integration with error handling elsewhere in a host application.

use thiserror::Error;

/// Errors that can occur while loading or building a pattern table.
///
/// All parsing operations return `Result<T, FormatError>`. Parsing errors are
/// fatal to construction: a parser either returns a fully populated table or
/// an error, never a partially built one.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file's suffix did not match any known pattern format.
    #[error("unrecognized pattern file format: {suffix}")]
    UnknownFormat { suffix: String },

    /// The file could not be opened or read.
    #[error("I/O error reading '{path}': {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A header or data line was malformed: bad token count, non-numeric
    /// value, or an inconsistent table size.
    #[error("parse error in {context}: {message}")]
    Parse { context: String, message: String },

    /// A value violated a structural invariant (non-ascending keys,
    /// non-positive beamwidth, unsupported symmetry code).
    #[error("invariant violated: {message}")]
    RangeInvariant { message: String },
}

impl FormatError {
    pub fn unknown_format(suffix: impl Into<String>) -> Self {
        Self::UnknownFormat {
            suffix: suffix.into(),
        }
    }

    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn range_invariant(message: impl Into<String>) -> Self {
        Self::RangeInvariant {
            message: message.into(),
        }
    }
}

/// Type alias for `Result` using `FormatError`.
pub type Result<T> = std::result::Result<T, FormatError>;
