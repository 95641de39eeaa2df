//! Shared line-oriented text parsing helpers.
//!
//! Every format in [`crate::parsers`] is a line-oriented text file with
//! whitespace-separated numeric tokens, a locale-independent decimal point,
//! and comment lines beginning with `//` or `#`. These helpers centralize
//! that so each format module only encodes its header layout and table
//! shape.

use crate::error::{FormatError, Result};

/// Strip `//` and `#` comments and blank lines from a source file, yielding
/// significant lines in order.
pub fn significant_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.lines().filter_map(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
            None
        } else {
            Some(trimmed)
        }
    })
}

/// Split a line into whitespace-separated tokens.
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse a whitespace-separated token as `f64`, with a context string used
/// to build a readable [`FormatError::Parse`] on failure.
pub fn parse_f64(context: &str, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| FormatError::parse(context, format!("expected a number, found '{token}'")))
}

/// Parse a whitespace-separated token as `i64`.
pub fn parse_i64(context: &str, token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| FormatError::parse(context, format!("expected an integer, found '{token}'")))
}

/// Fetch token `idx` out of a pre-split token slice, with a useful error
/// message when the line is short.
pub fn expect_token<'a>(context: &str, toks: &[&'a str], idx: usize) -> Result<&'a str> {
    toks.get(idx).copied().ok_or_else(|| {
        FormatError::parse(
            context,
            format!("expected at least {} tokens, found {}", idx + 1, toks.len()),
        )
    })
}

/// Convert an on-disk angle in degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}
