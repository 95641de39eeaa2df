//! REL (`.rel`) format parser.
//!
//! Like PAT but explicitly relative (maximum stored gain is 0 dB, the
//! caller's `refGain` is added at query time) with a terser header: a
//! single line giving both sample counts, angle always in plain degrees,
//! no symmetry folding.
//!
//! ```text
//! <az_count> <el_count>
//! <angle_deg> <gain_db>   (az_count rows)
//! ...
//! <angle_deg> <gain_db>   (el_count rows)
//! ...
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::InterpTable;

#[derive(Debug, Clone)]
pub struct RelTable {
    pub azim: InterpTable<f64>,
    pub elev: InterpTable<f64>,
}

pub fn parse(contents: &str) -> Result<RelTable> {
    let mut lines = significant_lines(contents);

    let header = lines
        .next()
        .ok_or_else(|| FormatError::parse("REL header", "file is empty"))?;
    let toks = tokens(header);
    let az_count = parse_i64("REL header", expect_token("REL header", &toks, 0)?)? as usize;
    let el_count = parse_i64("REL header", expect_token("REL header", &toks, 1)?)? as usize;

    let azim = parse_block(&mut lines, "REL azimuth block", az_count)?;
    let elev = parse_block(&mut lines, "REL elevation block", el_count)?;

    azim.validate()?;
    elev.validate()?;

    let (_, az_max) = azim
        .extremes()
        .expect("validated table has at least 2 samples");
    if az_max > 0.01 {
        tracing::warn!(
            max_azim_gain_db = az_max,
            "REL azimuth table maximum is not 0 dB; file may not be truly relative"
        );
    }

    tracing::debug!(
        azim_samples = azim.len(),
        elev_samples = elev.len(),
        "parsed REL pattern"
    );

    Ok(RelTable { azim, elev })
}

fn parse_block<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    context: &str,
    count: usize,
) -> Result<InterpTable<f64>> {
    let mut table = InterpTable::with_capacity(count);
    for i in 0..count {
        let line = lines
            .next()
            .ok_or_else(|| FormatError::parse(context, format!("missing sample row {i}")))?;
        let row = tokens(line);
        let angle_deg = parse_f64(context, expect_token(context, &row, 0)?)?;
        let gain_db = parse_f64(context, expect_token(context, &row, 1)?)?;
        table.insert(angle_deg.to_radians(), gain_db);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
3 3
-10 -3.0
0 0.0
10 -3.0
-10 -6.0
0 0.0
10 -6.0
";

    #[test]
    fn parses_both_blocks() {
        let table = parse(FIXTURE).unwrap();
        assert_eq!(table.azim.len(), 3);
        assert_eq!(table.elev.len(), 3);
    }

    #[test]
    fn peak_is_zero_dB_for_a_relative_table() {
        let table = parse(FIXTURE).unwrap();
        assert_eq!(table.azim.extremes().unwrap().1, 0.0);
    }

    #[test]
    fn missing_rows_is_a_parse_error() {
        let truncated = "3 3\n-10 -3.0\n0 0.0\n";
        assert!(parse(truncated).is_err());
    }
}
