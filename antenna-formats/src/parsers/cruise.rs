//! CRUISE (`.cru`) format parser.
//!
//! Stores, for each of azimuth and elevation, a regular angle grid sampled
//! at a set of frequencies; values on disk are *voltage* gains (squaring
//! and dB conversion happen at query time in `antenna-patterns`, since that
//! is a gain-computation rule rather than a structural parsing concern).
//!
//! ```text
//! AZIMUTH
//! <angle_count> <freq_count>
//! <angle_min_deg> <angle_step_deg>
//! <freq_1_ghz> <freq_2_ghz> ... <freq_freq_count_ghz>
//! <voltage_1> <voltage_2> ... <voltage_angle_count>   (one row per frequency)
//! ...
//! ELEVATION
//! ... (same shape)
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::InterpTable;

/// One axis (azimuth or elevation) of a CRUISE table: a regular angle grid,
/// one voltage-gain row per frequency.
#[derive(Debug, Clone)]
pub struct CruiseAxis {
    /// Ascending frequency axis, in Hz.
    pub freq_axis: Vec<f64>,
    /// `rows[freq_idx]` is the voltage gain, keyed by angle (radians), at
    /// that frequency.
    pub rows: Vec<InterpTable<f64>>,
}

impl CruiseAxis {
    pub fn validate(&self) -> Result<()> {
        if self.freq_axis.len() < 1 {
            return Err(FormatError::range_invariant(
                "CRUISE axis needs at least one frequency row",
            ));
        }
        if self.freq_axis.len() != self.rows.len() {
            return Err(FormatError::range_invariant(
                "CRUISE frequency axis length does not match row count",
            ));
        }
        for w in self.freq_axis.windows(2) {
            if w[1] <= w[0] {
                return Err(FormatError::range_invariant(
                    "CRUISE frequency axis must be strictly ascending",
                ));
            }
        }
        for row in &self.rows {
            row.validate()?;
        }
        Ok(())
    }

    pub fn freq_bounds(&self) -> (f64, f64) {
        (
            *self.freq_axis.first().expect("validated axis is non-empty"),
            *self.freq_axis.last().expect("validated axis is non-empty"),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CruiseTable {
    pub azim: CruiseAxis,
    pub elev: CruiseAxis,
}

pub fn parse(contents: &str) -> Result<CruiseTable> {
    let mut lines = significant_lines(contents);
    let azim = parse_axis(&mut lines, "AZIMUTH")?;
    let elev = parse_axis(&mut lines, "ELEVATION")?;
    azim.validate()?;
    elev.validate()?;

    tracing::debug!(
        azim_freqs = azim.freq_axis.len(),
        elev_freqs = elev.freq_axis.len(),
        "parsed CRUISE pattern"
    );

    Ok(CruiseTable { azim, elev })
}

fn parse_axis<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    expected_label: &str,
) -> Result<CruiseAxis> {
    let context = format!("CRUISE {expected_label} block");
    let label_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing axis label"))?;
    if !label_line.eq_ignore_ascii_case(expected_label) {
        return Err(FormatError::parse(
            &context,
            format!("expected '{expected_label}', found '{label_line}'"),
        ));
    }

    let dims_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing angle/freq counts"))?;
    let dims = tokens(dims_line);
    let angle_count = parse_i64(&context, expect_token(&context, &dims, 0)?)? as usize;
    let freq_count = parse_i64(&context, expect_token(&context, &dims, 1)?)? as usize;

    let limits_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing angle min/step"))?;
    let limits = tokens(limits_line);
    let angle_min_deg = parse_f64(&context, expect_token(&context, &limits, 0)?)?;
    let angle_step_deg = parse_f64(&context, expect_token(&context, &limits, 1)?)?;

    let freq_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing frequency axis"))?;
    let freq_toks = tokens(freq_line);
    if freq_toks.len() != freq_count {
        return Err(FormatError::parse(
            &context,
            format!(
                "expected {freq_count} frequency values, found {}",
                freq_toks.len()
            ),
        ));
    }
    let mut freq_axis = Vec::with_capacity(freq_count);
    for tok in &freq_toks {
        freq_axis.push(parse_f64(&context, tok)? * 1.0e9);
    }

    let mut rows = Vec::with_capacity(freq_count);
    for f in 0..freq_count {
        let row_line = lines
            .next()
            .ok_or_else(|| FormatError::parse(&context, format!("missing voltage row {f}")))?;
        let row_toks = tokens(row_line);
        if row_toks.len() != angle_count {
            return Err(FormatError::parse(
                &context,
                format!(
                    "row {f}: expected {angle_count} voltage samples, found {}",
                    row_toks.len()
                ),
            ));
        }
        let mut table = InterpTable::with_capacity(angle_count);
        for (i, tok) in row_toks.iter().enumerate() {
            let voltage = parse_f64(&context, tok)?;
            let angle_rad = (angle_min_deg + angle_step_deg * i as f64).to_radians();
            table.insert(angle_rad, voltage);
        }
        rows.push(table);
    }

    Ok(CruiseAxis { freq_axis, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
AZIMUTH
3 2
-10 10
8.0 10.0
1.0 1.0 1.0
0.9 1.0 0.9
ELEVATION
3 2
-5 5
8.0 10.0
1.0 1.0 1.0
1.0 1.0 1.0
";

    #[test]
    fn parses_both_axes_and_all_rows() {
        let table = parse(FIXTURE).unwrap();
        assert_eq!(table.azim.freq_axis.len(), 2);
        assert_eq!(table.azim.rows.len(), 2);
        assert_eq!(table.azim.rows[0].len(), 3);
    }

    #[test]
    fn freq_axis_converted_to_hz() {
        let table = parse(FIXTURE).unwrap();
        assert_eq!(table.azim.freq_bounds(), (8.0e9, 10.0e9));
    }

    #[test]
    fn row_length_mismatch_is_an_error() {
        let bad = FIXTURE.replacen("1.0 1.0 1.0", "1.0 1.0", 1);
        assert!(parse(&bad).is_err());
    }
}
