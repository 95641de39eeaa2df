//! Monopulse (`.mon`) format parser.
//!
//! Two blocks, `SUM` and `DIFF`, each a regular `(azimuth, elevation)` grid
//! of complex samples (stored on disk as magnitude-dB / phase-degrees
//! pairs) repeated once per frequency row.
//!
//! ```text
//! SUM
//! <az_count> <el_count> <freq_count>
//! <az_min_deg> <az_step_deg>
//! <el_min_deg> <el_step_deg>
//! <freq_1_ghz> ... <freq_freq_count_ghz>
//! <mag_db> <phase_deg> ... (el_count pairs)     (one line per azimuth, repeated per frequency)
//! ...
//! DIFF
//! ... (same shape)
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::{Complex, InterpTable, Table2D};

#[derive(Debug, Clone)]
pub struct MonopulseBlock {
    /// Ascending frequency axis, in Hz.
    pub freq_axis: Vec<f64>,
    /// `grids[freq_idx]` is the `(az, el)` complex grid at that frequency.
    pub grids: Vec<Table2D<Complex>>,
}

impl MonopulseBlock {
    pub fn validate(&self) -> Result<()> {
        if self.freq_axis.is_empty() {
            return Err(FormatError::range_invariant(
                "Monopulse block needs at least one frequency row",
            ));
        }
        if self.freq_axis.len() != self.grids.len() {
            return Err(FormatError::range_invariant(
                "Monopulse frequency axis length does not match grid count",
            ));
        }
        for w in self.freq_axis.windows(2) {
            if w[1] <= w[0] {
                return Err(FormatError::range_invariant(
                    "Monopulse frequency axis must be strictly ascending",
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
            *self.freq_axis.first().expect("validated block is non-empty"),
            *self.freq_axis.last().expect("validated block is non-empty"),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MonopulseTable {
    pub sum: MonopulseBlock,
    pub diff: MonopulseBlock,
}

pub fn parse(contents: &str) -> Result<MonopulseTable> {
    let mut lines = significant_lines(contents);
    let sum = parse_block(&mut lines, "SUM")?;
    let diff = parse_block(&mut lines, "DIFF")?;
    sum.validate()?;
    diff.validate()?;

    tracing::debug!(
        sum_freqs = sum.freq_axis.len(),
        diff_freqs = diff.freq_axis.len(),
        "parsed Monopulse pattern"
    );

    Ok(MonopulseTable { sum, diff })
}

fn parse_block<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    expected_label: &str,
) -> Result<MonopulseBlock> {
    let context = format!("Monopulse {expected_label} block");
    let label_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing block label"))?;
    if !label_line.eq_ignore_ascii_case(expected_label) {
        return Err(FormatError::parse(
            &context,
            format!("expected '{expected_label}', found '{label_line}'"),
        ));
    }

    let dims_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing az/el/freq counts"))?;
    let dims = tokens(dims_line);
    let az_count = parse_i64(&context, expect_token(&context, &dims, 0)?)? as usize;
    let el_count = parse_i64(&context, expect_token(&context, &dims, 1)?)? as usize;
    let freq_count = parse_i64(&context, expect_token(&context, &dims, 2)?)? as usize;

    let az_limits_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing azimuth min/step"))?;
    let az_limits = tokens(az_limits_line);
    let az_min_deg = parse_f64(&context, expect_token(&context, &az_limits, 0)?)?;
    let az_step_deg = parse_f64(&context, expect_token(&context, &az_limits, 1)?)?;

    let el_limits_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing elevation min/step"))?;
    let el_limits = tokens(el_limits_line);
    let el_min_deg = parse_f64(&context, expect_token(&context, &el_limits, 0)?)?;
    let el_step_deg = parse_f64(&context, expect_token(&context, &el_limits, 1)?)?;

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

    let mut grids = Vec::with_capacity(freq_count);
    for f in 0..freq_count {
        let mut grid: Table2D<Complex> = Table2D::with_capacity(az_count);
        for a in 0..az_count {
            let row_line = lines.next().ok_or_else(|| {
                FormatError::parse(&context, format!("missing row (freq {f}, az {a})"))
            })?;
            let row_toks = tokens(row_line);
            if row_toks.len() != 2 * el_count {
                return Err(FormatError::parse(
                    &context,
                    format!(
                        "freq {f} az {a}: expected {} tokens ({el_count} mag/phase pairs), found {}",
                        2 * el_count,
                        row_toks.len()
                    ),
                ));
            }
            let mut el_table = InterpTable::with_capacity(el_count);
            for e in 0..el_count {
                let mag_db = parse_f64(&context, row_toks[2 * e])?;
                let phase_deg = parse_f64(&context, row_toks[2 * e + 1])?;
                let el_rad = (el_min_deg + el_step_deg * e as f64).to_radians();
                el_table.insert(el_rad, Complex::from_mag_db_phase_deg(mag_db, phase_deg));
            }
            let az_rad = (az_min_deg + az_step_deg * a as f64).to_radians();
            grid.push_row(az_rad, el_table);
        }
        grids.push(grid);
    }

    Ok(MonopulseBlock { freq_axis, grids })
}
