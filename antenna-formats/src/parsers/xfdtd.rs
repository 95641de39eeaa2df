//! XFDTD (`.xfd`/`.uan`) format parser.
//!
//! A `KEY: value` header block (frequency and grid shape) followed by a
//! dense `(theta, phi)` grid. Each on-disk row carries theta- and
//! phi-polarized gain plus their phases; phase only matters for coherent
//! field reconstruction, which this format's gain query never performs
//! (`antenna-patterns` combines `gainTheta`/`gainPhi` by polarity, see
//! §4.4), so phase columns are parsed for shape validation and discarded.
//! Converting `(theta, phi)` to `(az, el)` (`az = phi`, `el = pi/2 -
//! theta`) is a query-time concern, not this module's: it stores samples
//! keyed by the on-disk `(theta, phi)` axes directly.
//!
//! ```text
//! FREQUENCY: <freq_mhz>
//! THETA_COUNT: <n>
//! PHI_COUNT: <m>
//! THETA_STEP_DEG: <step>
//! PHI_STEP_DEG: <step>
//! DATA
//! <gain_theta_db> <gain_phi_db> <phase_theta_deg> <phase_phi_deg>   (one row per (theta, phi), theta-major)
//! ...
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{parse_f64, parse_i64, significant_lines, tokens};
use crate::table::{InterpTable, Table2D, ThetaPhiSample};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct XfdtdHeader {
    pub frequency_mhz: f64,
    pub theta_count: usize,
    pub phi_count: usize,
    pub theta_step_deg: f64,
    pub phi_step_deg: f64,
}

#[derive(Debug, Clone)]
pub struct XfdtdTable {
    pub header: XfdtdHeader,
    /// Bilinear grid keyed by `(theta, phi)`, both in radians.
    pub grid: Table2D<ThetaPhiSample>,
}

fn parse_header_field<'a>(fields: &HashMap<&'a str, &'a str>, key: &str) -> Result<&'a str> {
    fields
        .get(key)
        .copied()
        .ok_or_else(|| FormatError::parse("XFDTD header", format!("missing '{key}:' field")))
}

pub fn parse(contents: &str) -> Result<XfdtdTable> {
    let context = "XFDTD header";
    let mut lines = significant_lines(contents).peekable();

    let mut fields: HashMap<&str, &str> = HashMap::new();
    while let Some(&line) = lines.peek() {
        if line.eq_ignore_ascii_case("DATA") {
            lines.next();
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(FormatError::parse(
                context,
                format!("expected 'KEY: value' header line, found '{line}'"),
            ));
        };
        fields.insert(key.trim(), value.trim());
        lines.next();
    }

    let frequency_mhz = parse_f64(context, parse_header_field(&fields, "FREQUENCY")?)?;
    let theta_count = parse_i64(context, parse_header_field(&fields, "THETA_COUNT")?)? as usize;
    let phi_count = parse_i64(context, parse_header_field(&fields, "PHI_COUNT")?)? as usize;
    let theta_step_deg = parse_f64(context, parse_header_field(&fields, "THETA_STEP_DEG")?)?;
    let phi_step_deg = parse_f64(context, parse_header_field(&fields, "PHI_STEP_DEG")?)?;

    let header = XfdtdHeader {
        frequency_mhz,
        theta_count,
        phi_count,
        theta_step_deg,
        phi_step_deg,
    };

    let data_context = "XFDTD data block";
    let mut grid: Table2D<ThetaPhiSample> = Table2D::with_capacity(theta_count);
    for t in 0..theta_count {
        let mut phi_table = InterpTable::with_capacity(phi_count);
        for p in 0..phi_count {
            let row_line = lines.next().ok_or_else(|| {
                FormatError::parse(&data_context, format!("missing row (theta {t}, phi {p})"))
            })?;
            let row_toks = tokens(row_line);
            if row_toks.len() != 4 {
                return Err(FormatError::parse(
                    &data_context,
                    format!(
                        "theta {t} phi {p}: expected 4 tokens (gainTheta gainPhi phaseTheta phasePhi), found {}",
                        row_toks.len()
                    ),
                ));
            }
            let gain_theta_db = parse_f64(&data_context, row_toks[0])?;
            let gain_phi_db = parse_f64(&data_context, row_toks[1])?;
            let _phase_theta_deg = parse_f64(&data_context, row_toks[2])?;
            let _phase_phi_deg = parse_f64(&data_context, row_toks[3])?;
            let phi_rad = (phi_step_deg * p as f64).to_radians();
            phi_table.insert(phi_rad, ThetaPhiSample::new(gain_theta_db, gain_phi_db));
        }
        let theta_rad = (theta_step_deg * t as f64).to_radians();
        grid.push_row(theta_rad, phi_table);
    }
    grid.validate()?;

    tracing::debug!(
        frequency_mhz,
        theta_count,
        phi_count,
        "parsed XFDTD pattern"
    );

    Ok(XfdtdTable { header, grid })
}
