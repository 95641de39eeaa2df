//! Host-configurable knobs for the format parsers.

use derive_builder::Builder;

/// Options threaded through the factory into whichever parser handles a
/// given file extension.
///
/// Most formats are fully self-describing and ignore these; they exist for
/// the handful of cases the distilled format grammar cannot resolve on its
/// own — chiefly a PAT/REL file whose azimuth or elevation axis is stored
/// in beamwidth-relative units rather than plain degrees (§4.4 "PAT").
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct ParserOptions {
    /// Frequency hint (MHz), used by formats that need a default frequency
    /// when the file itself doesn't carry one.
    pub freq_hint_mhz: f32,
    /// Half-power azimuth beamwidth (radians), required to convert a
    /// beamwidth-unit PAT/REL azimuth axis to radians at parse time.
    pub default_hbw_rad: Option<f64>,
    /// Half-power elevation beamwidth (radians), same role for elevation.
    pub default_vbw_rad: Option<f64>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            freq_hint_mhz: 0.0,
            default_hbw_rad: None,
            default_vbw_rad: None,
        }
    }
}

impl ParserOptions {
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::default()
    }
}
