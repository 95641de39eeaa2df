//! EZNEC (`.ezn`) format parser.
//!
//! A set of elevation-sliced azimuth cuts. Each slice is a full azimuth
//! sweep at one elevation angle, with three gain columns per sample
//! (vertical, horizontal, and total-power), so that a query can pick the
//! column matching its requested polarity. Unlike the other formats, the
//! angle convention is declared per file rather than fixed: EZNEC exports
//! can use either compass bearing (0 deg = north, increasing clockwise) or
//! math convention (0 deg = east, increasing counterclockwise). The header
//! names which one was used, and the parser canonicalizes every azimuth to
//! math convention (radians) on the way in so downstream code never has to
//! care which file produced a table.
//!
//! ```text
//! CONVENTION <COMPASS|MATH>
//! <elevation_count>
//! ELEVATION <el_deg> <azimuth_count>
//! <az_deg> <v_db> <h_db> <tot_db>
//! ...
//! ELEVATION ...
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::{InterpTable, PolarizedSample, Table2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    /// 0 deg = north, angle increases clockwise.
    Compass,
    /// 0 deg = east, angle increases counterclockwise.
    Math,
}

impl AngleConvention {
    fn from_token(token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "COMPASS" => Ok(AngleConvention::Compass),
            "MATH" => Ok(AngleConvention::Math),
            other => Err(FormatError::parse(
                "EZNEC header",
                format!("unknown angle convention '{other}'"),
            )),
        }
    }

    /// Canonicalize a raw on-disk azimuth in degrees to math-convention
    /// radians.
    fn canonicalize_azim_deg(self, deg: f64) -> f64 {
        match self {
            AngleConvention::Math => deg.to_radians(),
            AngleConvention::Compass => (90.0 - deg).to_radians(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EznecTable {
    pub convention: AngleConvention,
    /// Bilinear grid keyed by `(elevation, azimuth)`, both in radians,
    /// azimuth canonicalized to math convention.
    pub grid: Table2D<PolarizedSample>,
}

pub fn parse(contents: &str) -> Result<EznecTable> {
    let context = "EZNEC header";
    let mut lines = significant_lines(contents);

    let convention_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing CONVENTION declaration"))?;
    let convention_toks = tokens(convention_line);
    let label = expect_token(context, &convention_toks, 0)?;
    if !label.eq_ignore_ascii_case("CONVENTION") {
        return Err(FormatError::parse(
            context,
            format!("expected 'CONVENTION', found '{label}'"),
        ));
    }
    let convention = AngleConvention::from_token(expect_token(context, &convention_toks, 1)?)?;

    let count_line = lines
        .next()
        .ok_or_else(|| FormatError::parse(context, "missing elevation slice count"))?;
    let elevation_count = parse_i64(context, count_line.trim())? as usize;

    let mut grid: Table2D<PolarizedSample> = Table2D::with_capacity(elevation_count);

    for s in 0..elevation_count {
        let slice_context = format!("EZNEC elevation slice {s}");
        let header_line = lines
            .next()
            .ok_or_else(|| FormatError::parse(&slice_context, "missing slice header"))?;
        let header_toks = tokens(header_line);
        let slice_label = expect_token(&slice_context, &header_toks, 0)?;
        if !slice_label.eq_ignore_ascii_case("ELEVATION") {
            return Err(FormatError::parse(
                &slice_context,
                format!("expected 'ELEVATION', found '{slice_label}'"),
            ));
        }
        let el_deg = parse_f64(&slice_context, expect_token(&slice_context, &header_toks, 1)?)?;
        let az_count =
            parse_i64(&slice_context, expect_token(&slice_context, &header_toks, 2)?)? as usize;

        let mut azim_table = InterpTable::with_capacity(az_count);
        for i in 0..az_count {
            let row = lines.next().ok_or_else(|| {
                FormatError::parse(&slice_context, format!("missing azimuth sample {i}"))
            })?;
            let row_toks = tokens(row);
            let az_deg = parse_f64(&slice_context, expect_token(&slice_context, &row_toks, 0)?)?;
            let v_db = parse_f64(&slice_context, expect_token(&slice_context, &row_toks, 1)?)?;
            let h_db = parse_f64(&slice_context, expect_token(&slice_context, &row_toks, 2)?)?;
            let tot_db = parse_f64(&slice_context, expect_token(&slice_context, &row_toks, 3)?)?;
            azim_table.insert(
                convention.canonicalize_azim_deg(az_deg),
                PolarizedSample::new(v_db, h_db, tot_db),
            );
        }
        azim_table.validate()?;

        let el_rad = el_deg.to_radians();
        grid.push_row(el_rad, azim_table);
    }

    grid.validate()?;

    tracing::debug!(
        convention = ?convention,
        elevations = elevation_count,
        "parsed EZNEC pattern"
    );

    Ok(EznecTable { convention, grid })
}
