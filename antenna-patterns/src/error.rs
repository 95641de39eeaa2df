//! Error types for the gain-query engine.
//!
//! `PatternError` wraps `antenna_formats::FormatError` (construction-time
//! failures: kinds 1-4) and adds the two query-time kinds (5-6). Query
//! methods never return this directly — a query always returns a gain
//! value, clamped to `SMALL_DB` on failure — but the narrower
//! [`QueryError`] subset is recorded in each pattern's last-error slot so a
//! host can diagnose why a query came back as "no signal".

use antenna_formats::FormatError;
use thiserror::Error;

/// Errors that can occur while loading a pattern file or dispatching a
/// query against one.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Failure while parsing or validating the on-disk file.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The query's frequency fell outside a format's required frequency
    /// axis and the format disallows clamping (Monopulse).
    #[error("frequency {freq_hz} Hz is outside the supported range [{min_hz}, {max_hz}] Hz")]
    UnsupportedFrequency {
        freq_hz: f64,
        min_hz: f64,
        max_hz: f64,
    },

    /// A polarization channel was requested but the file does not store it.
    #[error("polarization channel '{channel}' is not present in this pattern")]
    ChannelMissing { channel: String },
}

impl PatternError {
    pub fn unsupported_frequency(freq_hz: f64, min_hz: f64, max_hz: f64) -> Self {
        Self::UnsupportedFrequency {
            freq_hz,
            min_hz,
            max_hz,
        }
    }

    pub fn channel_missing(channel: impl Into<String>) -> Self {
        Self::ChannelMissing {
            channel: channel.into(),
        }
    }
}

/// Type alias for `Result` using `PatternError`.
pub type Result<T> = std::result::Result<T, PatternError>;

/// The query-time subset of [`PatternError`], recorded in a pattern's
/// last-error slot. Query methods never return `Result`; instead, they
/// clamp to `SMALL_DB` and stash the reason here for host diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("frequency outside supported range")]
    UnsupportedFrequency,
    #[error("requested polarization channel is not present")]
    ChannelMissing,
}

impl QueryError {
    /// Narrow a construction-time/dispatch error down to the query-time
    /// subset, where applicable.
    pub fn from_pattern_error(err: &PatternError) -> Option<Self> {
        match err {
            PatternError::UnsupportedFrequency { .. } => Some(QueryError::UnsupportedFrequency),
            PatternError::ChannelMissing { .. } => Some(QueryError::ChannelMissing),
            PatternError::Format(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_frequency_message_has_bounds() {
        let err = PatternError::unsupported_frequency(9.0e9, 10.0e9, 12.0e9);
        let msg = err.to_string();
        assert!(msg.contains("9000000000"));
        assert!(msg.contains("10000000000"));
    }

    #[test]
    fn channel_missing_message_names_channel() {
        let err = PatternError::channel_missing("HV");
        assert!(err.to_string().contains("HV"));
    }

    #[test]
    fn format_error_converts_via_from() {
        let format_err = FormatError::unknown_format(".foo");
        let pattern_err: PatternError = format_err.into();
        assert!(matches!(pattern_err, PatternError::Format(_)));
    }

    #[test]
    fn narrowing_drops_format_errors() {
        let format_err: PatternError = FormatError::unknown_format(".foo").into();
        assert_eq!(QueryError::from_pattern_error(&format_err), None);

        let unsupported = PatternError::unsupported_frequency(1.0, 2.0, 3.0);
        assert_eq!(
            QueryError::from_pattern_error(&unsupported),
            Some(QueryError::UnsupportedFrequency)
        );
    }
}
