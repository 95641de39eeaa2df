//! Polarization selector for a gain query.

use strum::{Display, EnumString};

/// Which polarization channel a query wants. Analytic models ignore this
/// except to record it; tabulated models route it to a parser-specific
/// channel (NSMA's named channels, EZNEC's V/H/Tot columns, XFDTD's
/// theta/phi components).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "PascalCase")]
pub enum Polarity {
    Horizontal,
    Vertical,
    RightCircular,
    LeftCircular,
    HorzVert,
    VertHorz,
    #[default]
    Unknown,
}
