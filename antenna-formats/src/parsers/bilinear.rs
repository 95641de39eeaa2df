//! BiLinear (`.bil`) format parser.
//!
//! A single real-valued `(azimuth, elevation)` grid, keyed on frequency
//! rows the same way as Monopulse, but each sample is a plain dB gain
//! rather than a complex pair.
//!
//! ```text
//! <az_count> <el_count> <freq_count>
//! <az_min_deg> <az_step_deg>
//! <el_min_deg> <el_step_deg>
//! <freq_1_ghz> ... <freq_freq_count_ghz>
//! <gain_db> ... (el_count values)     (one line per azimuth, repeated per frequency)
//! ...
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::{InterpTable, Table2D};

#[derive(Debug, Clone)]
pub struct BiLinearTable {
    /// Ascending frequency axis, in Hz.
    pub freq_axis: Vec<f64>,
    /// `grids[freq_idx]` is the `(az, el)` dB-gain grid at that frequency.
    pub grids: Vec<Table2D<f64>>,
}

impl BiLinearTable {
    pub fn validate(&self) -> Result<()> {
        if self.freq_axis.is_empty() {
            return Err(FormatError::range_invariant(
                "BiLinear table needs at least one frequency row",
            ));
        }
        if self.freq_axis.len() != self.grids.len() {
            return Err(FormatError::range_invariant(
                "BiLinear frequency axis length does not match grid count",
            ));
        }
        for w in self.freq_axis.windows(2) {
            if w[1] <= w[0] {
                return Err(FormatError::range_invariant(
                    "BiLinear frequency axis must be strictly ascending",
                ));
            }
        }
        for grid in &self.grids {
            grid.validate()?;
        }
        Ok(())
    }

    pub fn freq_bounds(&self) -> (f64, f64) {
        (
            *self.freq_axis.first().expect("validated table is non-empty"),
            *self.freq_axis.last().expect("validated table is non-empty"),
        )
    }
}

pub fn parse(contents: &str) -> Result<BiLinearTable> {
    let context = "BiLinear table";
    let mut lines = significant_lines(contents);

    let dims_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing az/el/freq counts"))?;
    let dims = tokens(dims_line);
    let az_count = parse_i64(context, expect_token(context, &dims, 0)?)? as usize;
    let el_count = parse_i64(context, expect_token(context, &dims, 1)?)? as usize;
    let freq_count = parse_i64(context, expect_token(context, &dims, 2)?)? as usize;

    let az_limits_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing azimuth min/step"))?;
    let az_limits = tokens(az_limits_line);
    let az_min_deg = parse_f64(context, expect_token(context, &az_limits, 0)?)?;
    let az_step_deg = parse_f64(context, expect_token(context, &az_limits, 1)?)?;

    let el_limits_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing elevation min/step"))?;
    let el_limits = tokens(el_limits_line);
    let el_min_deg = parse_f64(context, expect_token(context, &el_limits, 0)?)?;
    let el_step_deg = parse_f64(context, expect_token(context, &el_limits, 1)?)?;

    let freq_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing frequency axis"))?;
    let freq_toks = tokens(freq_line);
    if freq_toks.len() != freq_count {
        return Err(FormatError::parse(
            context,
            format!(
                "expected {freq_count} frequency values, found {}",
                freq_toks.len()
            ),
        ));
    }
    let mut freq_axis = Vec::with_capacity(freq_count);
    for tok in &freq_toks {
        freq_axis.push(parse_f64(context, tok)? * 1.0e9);
    }

    let mut grids = Vec::with_capacity(freq_count);
    for f in 0..freq_count {
        let mut grid: Table2D<f64> = Table2D::with_capacity(az_count);
        for a in 0..az_count {
            let row_line = lines
                .next()
                .ok_or_else(|| FormatError::parse(context, format!("missing row (freq {f}, az {a})")))?;
            let row_toks = tokens(row_line);
            if row_toks.len() != el_count {
                return Err(FormatError::parse(
                    context,
                    format!(
                        "freq {f} az {a}: expected {el_count} gain samples, found {}",
                        row_toks.len()
                    ),
                ));
            }
            let mut el_table = InterpTable::with_capacity(el_count);
            for (e, tok) in row_toks.iter().enumerate() {
                let gain_db = parse_f64(context, tok)?;
                let el_rad = (el_min_deg + el_step_deg * e as f64).to_radians();
                el_table.insert(el_rad, gain_db);
            }
            let az_rad = (az_min_deg + az_step_deg * a as f64).to_radians();
            grid.push_row(az_rad, el_table);
        }
        grids.push(grid);
    }

    let table = BiLinearTable { freq_axis, grids };
    table.validate()?;

    tracing::debug!(freqs = table.freq_axis.len(), "parsed BiLinear pattern");

    Ok(table)
}
