//! NSMA (`.nsm`) format parser.
//!
//! Header block of opaque free-text fields, then frequency range /
//! mid-band gain / half-power beamwidth, then up to eight named channels
//! keyed by `{HH, HV, VV, VH} x {AZ, EL}`.
//!
//! ```text
//! <manufacturer>
//! <model>
//! <comment>
//! <fcc_id>
//! <revision>
//! <date>
//! <antenna_id>
//! <mhz_low> <mhz_high>
//! <midband_gain_db>
//! <hbw_deg>
//! CHANNEL <HH|HV|VV|VH> <AZ|EL> <count>
//! <angle_deg> <gain_db>
//! ...
//! CHANNEL ...
//! ```

use crate::error::{FormatError, Result};
use crate::parsers::text::{expect_token, parse_f64, parse_i64, significant_lines, tokens};
use crate::table::InterpTable;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolChannel {
    Hh,
    Hv,
    Vv,
    Vh,
}

impl PolChannel {
    fn from_token(context: &str, token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "HH" => Ok(PolChannel::Hh),
            "HV" => Ok(PolChannel::Hv),
            "VV" => Ok(PolChannel::Vv),
            "VH" => Ok(PolChannel::Vh),
            other => Err(FormatError::parse(
                context,
                format!("unknown polarization channel '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneAxis {
    Az,
    El,
}

impl PlaneAxis {
    fn from_token(context: &str, token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "AZ" => Ok(PlaneAxis::Az),
            "EL" => Ok(PlaneAxis::El),
            other => Err(FormatError::parse(
                context,
                format!("unknown plane axis '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NsmaHeader {
    pub manufacturer: String,
    pub model: String,
    pub comment: String,
    pub fcc_id: String,
    pub revision: String,
    pub date: String,
    pub antenna_id: String,
    pub freq_low_mhz: f64,
    pub freq_high_mhz: f64,
    pub midband_gain_db: f64,
    pub half_power_beamwidth_rad: f64,
}

#[derive(Debug, Clone)]
pub struct NsmaTable {
    pub header: NsmaHeader,
    pub channels: HashMap<(PolChannel, PlaneAxis), InterpTable<f64>>,
}

impl NsmaTable {
    pub fn channel(&self, pol: PolChannel, axis: PlaneAxis) -> Option<&InterpTable<f64>> {
        self.channels.get(&(pol, axis))
    }
}

pub fn parse(contents: &str) -> Result<NsmaTable> {
    let mut lines = significant_lines(contents);
    let context = "NSMA header";

    let mut next_field = |field: &str| -> Result<String> {
        lines
            .next()
            .map(|s| s.to_string())
            .ok_or_else(|| FormatError::parse(context, format!("missing header field '{field}'")))
    };

    let manufacturer = next_field("manufacturer")?;
    let model = next_field("model")?;
    let comment = next_field("comment")?;
    let fcc_id = next_field("fcc_id")?;
    let revision = next_field("revision")?;
    let date = next_field("date")?;
    let antenna_id = next_field("antenna_id")?;

    let freq_line = next_field("mhz_low mhz_high")?;
    let freq_toks = tokens(&freq_line);
    let freq_low_mhz = parse_f64(context, expect_token(context, &freq_toks, 0)?)?;
    let freq_high_mhz = parse_f64(context, expect_token(context, &freq_toks, 1)?)?;

    let midband_line = next_field("midband_gain_db")?;
    let midband_gain_db = parse_f64(context, midband_line.trim())?;

    let hbw_line = next_field("half_power_beamwidth_deg")?;
    let hbw_deg = parse_f64(context, hbw_line.trim())?;

    let header = NsmaHeader {
        manufacturer,
        model,
        comment,
        fcc_id,
        revision,
        date,
        antenna_id,
        freq_low_mhz,
        freq_high_mhz,
        midband_gain_db,
        half_power_beamwidth_rad: hbw_deg.to_radians(),
    };

    let mut channels = HashMap::new();
    while let Some(line) = lines.next() {
        let toks = tokens(line);
        let label = expect_token("NSMA channel block", &toks, 0)?;
        if !label.eq_ignore_ascii_case("CHANNEL") {
            return Err(FormatError::parse(
                "NSMA channel block",
                format!("expected 'CHANNEL', found '{label}'"),
            ));
        }
        let pol = PolChannel::from_token("NSMA channel block", expect_token("NSMA channel block", &toks, 1)?)?;
        let axis = PlaneAxis::from_token("NSMA channel block", expect_token("NSMA channel block", &toks, 2)?)?;
        let count = parse_i64(
            "NSMA channel block",
            expect_token("NSMA channel block", &toks, 3)?,
        )? as usize;

        let mut table = InterpTable::with_capacity(count);
        for i in 0..count {
            let row = lines.next().ok_or_else(|| {
                FormatError::parse("NSMA channel block", format!("missing sample row {i}"))
            })?;
            let row_toks = tokens(row);
            let angle_deg = parse_f64("NSMA channel block", expect_token("NSMA channel block", &row_toks, 0)?)?;
            let gain_db = parse_f64("NSMA channel block", expect_token("NSMA channel block", &row_toks, 1)?)?;
            table.insert(angle_deg.to_radians(), gain_db);
        }
        table.validate()?;
        channels.insert((pol, axis), table);
    }

    if channels.is_empty() {
        return Err(FormatError::parse(
            "NSMA channel block",
            "no polarization channels present",
        ));
    }

    tracing::debug!(channels = channels.len(), "parsed NSMA pattern");

    Ok(NsmaTable { header, channels })
}
