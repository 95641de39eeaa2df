//! Suffix-dispatching file loader (C8).

use crate::error::PatternError;
use crate::handle::PatternHandle;
use crate::tabulated::{BiLinear, Cruise, Eznec, Monopulse, Nsma, Pat, Rel, Xfdtd};
use antenna_formats::options::ParserOptions;
use antenna_formats::parsers::{bilinear, cruise, eznec, monopulse, nsma, pat, rel, xfdtd};
use antenna_formats::FormatError;
use std::path::Path;

/// Load a pattern file, dispatching on the path's lowercased suffix (§4.7).
/// `freq_hint_mhz` is recorded on the resulting [`ParserOptions`] for
/// formats that need a default frequency when the file itself doesn't
/// carry one.
pub fn load_pattern_file(path: impl AsRef<Path>, freq_hint_mhz: f32) -> Result<PatternHandle, PatternError> {
    let path = path.as_ref();
    let filename = path.to_string_lossy().into_owned();
    let suffix = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    tracing::trace!(filename = %filename, freq_hint_mhz, "loading pattern file");

    let contents = std::fs::read_to_string(path).map_err(|e| FormatError::file_io(filename.clone(), e))?;
    let handle = load_from_contents(&suffix, &contents, freq_hint_mhz)?;
    Ok(handle.with_filename(filename))
}

/// Suffix + file-contents dispatch, split out from [`load_pattern_file`] so
/// the parser-selection logic can be exercised without touching a real
/// filesystem path.
fn load_from_contents(suffix: &str, contents: &str, freq_hint_mhz: f32) -> Result<PatternHandle, PatternError> {
    let opts = ParserOptions::builder().freq_hint_mhz(freq_hint_mhz).build().unwrap();

    match suffix {
        "pat" => {
            let table = pat::parse(contents, &opts)?;
            tracing::debug!(
                parser = "PAT",
                azim_samples = table.azim.inner().len(),
                elev_samples = table.elev.inner().len(),
                "selected pattern parser"
            );
            Ok(PatternHandle::from_kind(Pat::new(table)))
        }
        "rel" => {
            let table = rel::parse(contents)?;
            tracing::debug!(
                parser = "REL",
                azim_samples = table.azim.len(),
                elev_samples = table.elev.len(),
                "selected pattern parser"
            );
            Ok(PatternHandle::from_kind(Rel::new(table)))
        }
        "cru" => {
            let table = cruise::parse(contents)?;
            tracing::debug!(
                parser = "CRUISE",
                azim_freqs = table.azim.freq_axis.len(),
                elev_freqs = table.elev.freq_axis.len(),
                "selected pattern parser"
            );
            Ok(PatternHandle::from_kind(Cruise::new(table)))
        }
        "mon" => {
            let table = monopulse::parse(contents)?;
            tracing::debug!(
                parser = "Monopulse",
                sum_freqs = table.sum.freq_axis.len(),
                diff_freqs = table.diff.freq_axis.len(),
                "selected pattern parser"
            );
            Ok(PatternHandle::from_kind(Monopulse::new(table)))
        }
        "bil" => {
            let table = bilinear::parse(contents)?;
            tracing::debug!(parser = "BiLinear", freqs = table.freq_axis.len(), "selected pattern parser");
            Ok(PatternHandle::from_kind(BiLinear::new(table)))
        }
        "nsm" => {
            let table = nsma::parse(contents)?;
            tracing::debug!(parser = "NSMA", channels = table.channels.len(), "selected pattern parser");
            Ok(PatternHandle::from_kind(Nsma::new(table)))
        }
        "ezn" => {
            let table = eznec::parse(contents)?;
            tracing::debug!(parser = "EZNEC", "selected pattern parser");
            Ok(PatternHandle::from_kind(Eznec::new(table)))
        }
        "xfd" | "uan" => {
            let table = xfdtd::parse(contents)?;
            tracing::debug!(
                parser = "XFDTD",
                theta_count = table.header.theta_count,
                phi_count = table.header.phi_count,
                "selected pattern parser"
            );
            Ok(PatternHandle::from_kind(Xfdtd::new(table)))
        }
        other => {
            tracing::warn!(suffix = other, "no parser registered for this suffix");
            Err(FormatError::unknown_format(other.to_string()).into())
        }
    }
}
