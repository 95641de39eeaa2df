//! PAT (`.pat`, AntennaPatternTable) format parser.
//!
//! Grammar (line-oriented, comments per [`crate::parsers::text`]):
//!
//! ```text
//! <ANGLE_UNITS> <SYMMETRY>
//! AZIMUTH <count>
//! <angle_deg> <gain_db>
//! ...
//! ELEVATION <count>
//! <angle_deg> <gain_db>
//! ...
//! ```
//!
//! `ANGLE_UNITS` is `ANGLE` (sample keys are plain angle, in degrees) or
//! `BEAMWIDTHS` (sample keys are multiples of the half-power beamwidth,
//! converted to radians using [`crate::options::ParserOptions`]).
//! `SYMMETRY` is `1` (none) or `2` (mirror) — PAT never uses quadrant
//! symmetry, that's reserved for richer formats.

use crate::error::{FormatError, Result};
use crate::options::ParserOptions;
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::{SymmetricTable, Symmetry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnits {
    Angle,
    Beamwidths,
}

impl AngleUnits {
    fn from_token(context: &str, token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "ANGLE" | "DEGREES" | "RADIANS" => Ok(AngleUnits::Angle),
            "BEAMWIDTHS" => Ok(AngleUnits::Beamwidths),
            other => Err(FormatError::parse(
                context,
                format!("unknown angle units '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatTable {
    pub angle_units: AngleUnits,
    pub azim: SymmetricTable<f64>,
    pub elev: SymmetricTable<f64>,
}

/// Parse a `.pat` file's contents into a [`PatTable`].
pub fn parse(contents: &str, opts: &ParserOptions) -> Result<PatTable> {
    let mut lines = significant_lines(contents);

    let header = lines
        .next()
        .ok_or_else(|| FormatError::parse("PAT header", "file is empty"))?;
    let header_toks = tokens(header);
    let angle_units = AngleUnits::from_token(
        "PAT header",
        expect_token("PAT header", &header_toks, 0)?,
    )?;
    let symmetry_code = parse_i64(
        "PAT header",
        expect_token("PAT header", &header_toks, 1)?,
    )?;
    let symmetry = Symmetry::from_code(symmetry_code)?;

    let azim = parse_axis_block(&mut lines, "AZIMUTH", angle_units, symmetry, opts.default_hbw_rad)?;
    let elev = parse_axis_block(&mut lines, "ELEVATION", angle_units, symmetry, opts.default_vbw_rad)?;

    azim.validate()?;
    elev.validate()?;

    tracing::debug!(
        azim_samples = azim.inner().len(),
        elev_samples = elev.inner().len(),
        "parsed PAT pattern"
    );

    Ok(PatTable {
        angle_units,
        azim,
        elev,
    })
}

fn parse_axis_block<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    expected_label: &str,
    angle_units: AngleUnits,
    symmetry: Symmetry,
    default_bw_rad: Option<f64>,
) -> Result<SymmetricTable<f64>> {
    let context = format!("PAT {expected_label} block");
    let header = lines
        .next()
        .ok_or_else(|| FormatError::parse(&context, "missing block header"))?;
    let toks = tokens(header);
    let label = expect_token(&context, &toks, 0)?;
    if !label.eq_ignore_ascii_case(expected_label) {
        return Err(FormatError::parse(
            &context,
            format!("expected '{expected_label}', found '{label}'"),
        ));
    }
    let count = parse_i64(&context, expect_token(&context, &toks, 1)?)? as usize;

    if angle_units == AngleUnits::Beamwidths && default_bw_rad.is_none() {
        return Err(FormatError::parse(
            &context,
            "BEAMWIDTHS angle units require a default beamwidth in ParserOptions",
        ));
    }

    let mut table = SymmetricTable::new(symmetry);
    for i in 0..count {
        let line = lines
            .next()
            .ok_or_else(|| FormatError::parse(&context, format!("missing sample row {i}")))?;
        let row = tokens(line);
        let raw_angle = parse_f64(&context, expect_token(&context, &row, 0)?)?;
        let gain_db = parse_f64(&context, expect_token(&context, &row, 1)?)?;
        let angle_rad = match angle_units {
            AngleUnits::Angle => raw_angle.to_radians(),
            AngleUnits::Beamwidths => raw_angle * default_bw_rad.unwrap(),
        };
        table.insert(angle_rad, gain_db);
    }
    Ok(table)
}
