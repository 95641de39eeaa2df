//! The polymorphic pattern value returned by the factory (C8) and by the
//! analytic constructors: a tagged union over the thirteen pattern
//! variants, plus the bookkeeping (filename, validity, last-queried
//! polarity, last query error) that doesn't belong to any one variant.

use crate::analytic::{CscSq, Gauss, Omni, Pedestal, SinXX};
use crate::error::QueryError;
use crate::polarity::Polarity;
use crate::query::GainQuery;
use crate::tabulated::{BiLinear, Cruise, Eznec, Monopulse, Nsma, Pat, Rel, Xfdtd};
use crate::traits::PatternGain;
use antenna_formats::parsers::pat::{AngleUnits, PatTable};
use antenna_formats::table::{Symmetry, SymmetricTable};
use std::cell::Cell;
use std::fmt;
use strum::{Display, EnumString};

/// Which pattern variant a [`PatternHandle`] wraps. Mirrors §3's closed
/// variant set; format-derived names match the on-disk format's own
/// capitalization rather than a uniform casing convention, since hosts
/// may log/display this string verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum PatternType {
    Gauss,
    CscSq,
    SinXX,
    Pedestal,
    Omni,
    Table,
    RelTable,
    #[strum(serialize = "CRUISE")]
    Cruise,
    Monopulse,
    BiLinear,
    #[strum(serialize = "NSMA")]
    Nsma,
    #[strum(serialize = "EZNEC")]
    Eznec,
    #[strum(serialize = "XFDTD")]
    Xfdtd,
}

/// `antennaPatternTypeName` (§6): same as `PatternType::to_string()`, kept
/// as a free function matching the spec's language-neutral surface.
pub fn antenna_pattern_type_name(t: PatternType) -> String {
    t.to_string()
}

/// `antennaPatternTypeFromName` (§6): the inverse of
/// [`antenna_pattern_type_name`].
pub fn antenna_pattern_type_from_name(s: &str) -> Result<PatternType, strum::ParseError> {
    s.parse()
}

/// The thirteen pattern implementations, behind one dispatch point.
/// `PatternHandle` holds one of these plus the cross-variant bookkeeping;
/// every method below matches once and delegates, rather than spreading
/// the match across the handle's own methods.
#[derive(Debug)]
enum PatternKind {
    Gauss(Gauss),
    CscSq(CscSq),
    SinXX(SinXX),
    Pedestal(Pedestal),
    Omni(Omni),
    Table(Pat),
    RelTable(Rel),
    Cruise(Cruise),
    Monopulse(Monopulse),
    BiLinear(BiLinear),
    Nsma(Nsma),
    Eznec(Eznec),
    Xfdtd(Xfdtd),
}

impl PatternKind {
    fn pattern_type(&self) -> PatternType {
        match self {
            PatternKind::Gauss(_) => PatternType::Gauss,
            PatternKind::CscSq(_) => PatternType::CscSq,
            PatternKind::SinXX(_) => PatternType::SinXX,
            PatternKind::Pedestal(_) => PatternType::Pedestal,
            PatternKind::Omni(_) => PatternType::Omni,
            PatternKind::Table(_) => PatternType::Table,
            PatternKind::RelTable(_) => PatternType::RelTable,
            PatternKind::Cruise(_) => PatternType::Cruise,
            PatternKind::Monopulse(_) => PatternType::Monopulse,
            PatternKind::BiLinear(_) => PatternType::BiLinear,
            PatternKind::Nsma(_) => PatternType::Nsma,
            PatternKind::Eznec(_) => PatternType::Eznec,
            PatternKind::Xfdtd(_) => PatternType::Xfdtd,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $variant_method:ident, $($args:expr),*) => {
        match $self {
            PatternKind::Gauss(p) => p.$variant_method($($args),*),
            PatternKind::CscSq(p) => p.$variant_method($($args),*),
            PatternKind::SinXX(p) => p.$variant_method($($args),*),
            PatternKind::Pedestal(p) => p.$variant_method($($args),*),
            PatternKind::Omni(p) => p.$variant_method($($args),*),
            PatternKind::Table(p) => p.$variant_method($($args),*),
            PatternKind::RelTable(p) => p.$variant_method($($args),*),
            PatternKind::Cruise(p) => p.$variant_method($($args),*),
            PatternKind::Monopulse(p) => p.$variant_method($($args),*),
            PatternKind::BiLinear(p) => p.$variant_method($($args),*),
            PatternKind::Nsma(p) => p.$variant_method($($args),*),
            PatternKind::Eznec(p) => p.$variant_method($($args),*),
            PatternKind::Xfdtd(p) => p.$variant_method($($args),*),
        }
    };
}

impl PatternGain for PatternKind {
    fn gain(&self, query: &GainQuery) -> f32 {
        dispatch!(self, gain, query)
    }

    fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        dispatch!(self, min_max_gain, query)
    }

    fn last_error(&self) -> Option<QueryError> {
        dispatch!(self, last_error,)
    }
}

/// The opaque object returned by [`crate::factory::load_pattern_file`] and
/// by the analytic constructors (`PatternHandle::new_gauss()`, ...).
/// Immutable apart from the min/max cache owned by its inner variant and
/// the bookkeeping below (§3's lifecycle note).
pub struct PatternHandle {
    kind: PatternKind,
    filename: String,
    valid: bool,
    last_polarity: Cell<Polarity>,
}

impl fmt::Debug for PatternHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternHandle")
            .field("type", &self.kind.pattern_type())
            .field("filename", &self.filename)
            .field("valid", &self.valid)
            .finish()
    }
}

impl PatternHandle {
    pub(crate) fn from_kind(kind_inner: impl Into<PatternKindBuilder>) -> Self {
        let kind = kind_inner.into().0;
        Self {
            kind,
            filename: String::new(),
            valid: true,
            last_polarity: Cell::new(Polarity::Unknown),
        }
    }

    pub(crate) fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Gain in dB at the query's direction, frequency and polarity.
    /// Records `query.polarity` (§4.6: "analytic models ignore polarity
    /// except to record it").
    pub fn gain(&self, query: &GainQuery) -> f32 {
        self.last_polarity.set(query.polarity);
        self.kind.gain(query)
    }

    /// `(min, max)` gain for this query's beamwidth/polarity/frequency/
    /// delta selector.
    pub fn min_max_gain(&self, query: &GainQuery) -> (f32, f32) {
        self.last_polarity.set(query.polarity);
        self.kind.min_max_gain(query)
    }

    /// The reason the most recent query clamped to `SMALL_DB`, if any.
    pub fn last_error(&self) -> Option<QueryError> {
        self.kind.last_error()
    }

    pub fn pattern_type(&self) -> PatternType {
        self.kind.pattern_type()
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The polarity of the most recently issued query, `Unknown` if none
    /// has been issued yet.
    pub fn polarity(&self) -> Polarity {
        self.last_polarity.get()
    }

    pub fn new_gauss() -> Self {
        Self::from_kind(PatternKindBuilder(PatternKind::Gauss(Gauss::new())))
    }

    pub fn new_csc_sq() -> Self {
        Self::from_kind(PatternKindBuilder(PatternKind::CscSq(CscSq::new())))
    }

    pub fn new_sin_xx() -> Self {
        Self::from_kind(PatternKindBuilder(PatternKind::SinXX(SinXX::new())))
    }

    pub fn new_pedestal() -> Self {
        Self::from_kind(PatternKindBuilder(PatternKind::Pedestal(Pedestal::new())))
    }

    pub fn new_omni() -> Self {
        Self::from_kind(PatternKindBuilder(PatternKind::Omni(Omni::new())))
    }

    /// An empty, directly-constructed `AntennaPatternTable` (§6), populated
    /// via `set_azim_sample`/`set_elev_sample` rather than a file parse.
    pub fn new_table() -> Self {
        let table = PatTable {
            angle_units: AngleUnits::Angle,
            azim: SymmetricTable::new(Symmetry::None),
            elev: SymmetricTable::new(Symmetry::None),
        };
        Self::from_kind(PatternKindBuilder(PatternKind::Table(Pat::new(table)))).with_valid(false)
    }

    fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// Insert one azimuth sample into a programmatically-built table
    /// pattern. No-op (logged) on any other variant.
    pub fn set_azim_sample(&mut self, angle_rad: f64, gain_db: f64) {
        match &mut self.kind {
            PatternKind::Table(p) => p.table_mut().azim.insert(angle_rad, gain_db),
            _ => tracing::warn!("set_azim_sample called on a non-Table pattern; ignored"),
        }
    }

    /// Insert one elevation sample into a programmatically-built table
    /// pattern. No-op (logged) on any other variant.
    pub fn set_elev_sample(&mut self, angle_rad: f64, gain_db: f64) {
        match &mut self.kind {
            PatternKind::Table(p) => p.table_mut().elev.insert(angle_rad, gain_db),
            _ => tracing::warn!("set_elev_sample called on a non-Table pattern; ignored"),
        }
    }

    pub fn set_angle_units(&mut self, units: AngleUnits) {
        match &mut self.kind {
            PatternKind::Table(p) => p.table_mut().angle_units = units,
            _ => tracing::warn!("set_angle_units called on a non-Table pattern; ignored"),
        }
    }

    /// Set the symmetry code (1/2/4) on both axes of a programmatically
    /// built table pattern.
    pub fn set_symmetry(&mut self, code: i64) -> antenna_formats::Result<()> {
        let symmetry = Symmetry::from_code(code)?;
        if let PatternKind::Table(p) = &mut self.kind {
            p.table_mut().azim.symmetry = symmetry;
            p.table_mut().elev.symmetry = symmetry;
        } else {
            tracing::warn!("set_symmetry called on a non-Table pattern; ignored");
        }
        Ok(())
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }
}

/// Newtype wrapper so [`PatternHandle::from_kind`] can be called with a
/// bare `PatternKind` value without exposing that enum outside this
/// module.
pub(crate) struct PatternKindBuilder(PatternKind);

macro_rules! impl_into_builder {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for PatternKindBuilder {
            fn from(value: $ty) -> Self {
                PatternKindBuilder(PatternKind::$variant(value))
            }
        }
    };
}

impl_into_builder!(Table, Pat);
impl_into_builder!(RelTable, Rel);
impl_into_builder!(Cruise, Cruise);
impl_into_builder!(Monopulse, Monopulse);
impl_into_builder!(BiLinear, BiLinear);
impl_into_builder!(Nsma, Nsma);
impl_into_builder!(Eznec, Eznec);
impl_into_builder!(Xfdtd, Xfdtd);
