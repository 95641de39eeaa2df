//! Ordered interpolation tables (C2).
//!
//! [`InterpTable`] is the workhorse: a strictly-ascending-key lookup table
//! with linear interpolation and endpoint clamping (no extrapolation).
//! [`SymmetricTable`] wraps one with a symmetry code that folds a query key
//! into the stored range before delegating to it. [`Table2D`] composes two
//! axes for the bilinear formats (BiLinear, Monopulse, CRUISE).

use crate::error::{FormatError, Result};

/// Component-wise linear interpolation, implemented by every value type an
/// `InterpTable` can store.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t as f32
    }
}

/// A plain `{re, im}` pair with component-wise linear interpolation.
///
/// No library complex type is required for Monopulse: addition and linear
/// blending are the only operations a table needs, and magnitude is taken
/// via `hypot` in [`crate::angle::complex_magnitude_db`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Build a complex sample from a magnitude (dB) / phase (degrees) pair,
    /// the on-disk representation used by the Monopulse format.
    pub fn from_mag_db_phase_deg(mag_db: f64, phase_deg: f64) -> Self {
        let mag = crate::angle::db2lin(mag_db).sqrt();
        let phase = phase_deg.to_radians();
        Self::new(mag * phase.cos(), mag * phase.sin())
    }

    pub fn magnitude_db(self) -> f64 {
        crate::angle::complex_magnitude_db(self.re, self.im)
    }
}

impl Lerp for Complex {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Complex::new(f64::lerp(a.re, b.re, t), f64::lerp(a.im, b.im, t))
    }
}

/// One EZNEC azimuth sample: the three columns a `.ezn` file carries per
/// angle (vertical, horizontal and total-power gain, all in dB).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarizedSample {
    pub v_db: f64,
    pub h_db: f64,
    pub tot_db: f64,
}

impl PolarizedSample {
    pub fn new(v_db: f64, h_db: f64, tot_db: f64) -> Self {
        Self { v_db, h_db, tot_db }
    }
}

impl Lerp for PolarizedSample {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        PolarizedSample::new(
            f64::lerp(a.v_db, b.v_db, t),
            f64::lerp(a.h_db, b.h_db, t),
            f64::lerp(a.tot_db, b.tot_db, t),
        )
    }
}

/// One XFDTD sample: the theta- and phi-polarized gain components at a
/// `(theta, phi)` direction (dB).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThetaPhiSample {
    pub gain_theta_db: f64,
    pub gain_phi_db: f64,
}

impl ThetaPhiSample {
    pub fn new(gain_theta_db: f64, gain_phi_db: f64) -> Self {
        Self {
            gain_theta_db,
            gain_phi_db,
        }
    }
}

impl Lerp for ThetaPhiSample {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        ThetaPhiSample::new(
            f64::lerp(a.gain_theta_db, b.gain_theta_db, t),
            f64::lerp(a.gain_phi_db, b.gain_phi_db, t),
        )
    }
}

/// An ordered mapping from a real key to a value, supporting linear
/// interpolation between the two nearest stored keys.
///
/// Invariants:
/// - keys are strictly ascending (enforced on insert via sorted insertion;
///   a duplicate key overwrites rather than duplicating),
/// - at least two keys are required before `lookup` can interpolate,
/// - `lookup` clamps to the nearest endpoint outside the stored range —
///   it never extrapolates.
#[derive(Debug, Clone)]
pub struct InterpTable<V> {
    keys: Vec<f64>,
    values: Vec<V>,
}

impl<V: Lerp> InterpTable<V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Pre-size the backing storage from a header-declared sample count.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            keys: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert `(key, value)`, keeping keys sorted. A duplicate key
    /// overwrites the previously stored value rather than inserting again.
    pub fn insert(&mut self, key: f64, value: V) {
        match self
            .keys
            .binary_search_by(|k| k.partial_cmp(&key).expect("table key must not be NaN"))
        {
            Ok(idx) => self.values[idx] = value,
            Err(idx) => {
                self.keys.insert(idx, key);
                self.values.insert(idx, value);
            }
        }
    }

    /// `(min_key, max_key)` over stored samples.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        }
    }

    /// Locate the key by bisection: if outside the stored range, clamp to
    /// the nearest endpoint; otherwise linearly interpolate between the
    /// bracketing pair.
    pub fn lookup(&self, key: f64) -> V
    where
        V: Copy,
    {
        debug_assert!(
            self.keys.len() >= 2,
            "InterpTable::lookup requires at least two samples"
        );
        let n = self.keys.len();
        if key <= self.keys[0] {
            return self.values[0];
        }
        if key >= self.keys[n - 1] {
            return self.values[n - 1];
        }
        let idx = match self
            .keys
            .binary_search_by(|k| k.partial_cmp(&key).expect("table key must not be NaN"))
        {
            Ok(idx) => return self.values[idx],
            Err(idx) => idx,
        };
        let (k0, k1) = (self.keys[idx - 1], self.keys[idx]);
        let (v0, v1) = (self.values[idx - 1], self.values[idx]);
        let t = (key - k0) / (k1 - k0);
        V::lerp(v0, v1, t)
    }

    /// Iterate the stored values in key order, without their keys. Used by
    /// callers (e.g. Monopulse's min/max scan) that need every sample's
    /// value but have no `extremes()` specialization for their `V`.
    pub fn values(&self) -> impl Iterator<Item = V> + '_
    where
        V: Copy,
    {
        self.values.iter().copied()
    }

    /// Verify the "at least two keys" invariant, returning a
    /// [`FormatError::RangeInvariant`] describing the violation otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.keys.len() < 2 {
            return Err(FormatError::range_invariant(format!(
                "interpolation table needs at least 2 samples, has {}",
                self.keys.len()
            )));
        }
        Ok(())
    }
}

impl InterpTable<f64> {
    /// `(min_value, max_value)` over stored samples, used to seed the
    /// min/max gain cache without a fresh angular scan.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((lo, hi))
    }
}

impl<V: Lerp> Default for InterpTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// How a stored table extends to the full angular domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// Samples cover the whole domain; no folding.
    None,
    /// Samples cover `[0, max]`; the pattern is symmetric about 0
    /// (`gain(x) == gain(-x)`).
    Mirror,
    /// Samples cover `[0, pi/2]`; the pattern repeats with a
    /// sign-and-reflect rule every quadrant.
    Quadrant,
}

impl Symmetry {
    /// Decode the on-disk symmetry code used by PAT/REL headers.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Symmetry::None),
            2 => Ok(Symmetry::Mirror),
            4 => Ok(Symmetry::Quadrant),
            other => Err(FormatError::range_invariant(format!(
                "symmetry code must be 1, 2, or 4, got {other}"
            ))),
        }
    }

    fn fold(self, key: f64) -> f64 {
        match self {
            Symmetry::None => key,
            Symmetry::Mirror => key.abs(),
            Symmetry::Quadrant => {
                let half_pi = std::f64::consts::FRAC_PI_2;
                let folded = key.abs() % std::f64::consts::PI;
                if folded > half_pi {
                    std::f64::consts::PI - folded
                } else {
                    folded
                }
            }
        }
    }
}

/// An [`InterpTable`] plus a [`Symmetry`] code describing how the stored
/// samples extend to the full domain. Lookup folds the key before
/// delegating to the inner table.
#[derive(Debug, Clone)]
pub struct SymmetricTable<V> {
    pub symmetry: Symmetry,
    inner: InterpTable<V>,
}

impl<V: Lerp + Copy> SymmetricTable<V> {
    pub fn new(symmetry: Symmetry) -> Self {
        Self {
            symmetry,
            inner: InterpTable::new(),
        }
    }

    pub fn insert(&mut self, key: f64, value: V) {
        self.inner.insert(key, value);
    }

    pub fn lookup(&self, key: f64) -> V {
        self.inner.lookup(self.symmetry.fold(key))
    }

    pub fn validate(&self) -> Result<()> {
        self.inner.validate()
    }

    pub fn inner(&self) -> &InterpTable<V> {
        &self.inner
    }
}

/// A 2-D table over two angular axes, used by BiLinear, Monopulse and the
/// per-frequency angle grids of CRUISE. Bilinear interpolation composes two
/// 1-D lookups rather than duplicating bisection logic: interpolate each
/// stored row in the second axis, then interpolate the two results in the
/// first axis.
#[derive(Debug, Clone)]
pub struct Table2D<V> {
    /// Ascending axis-1 (e.g. azimuth) keys, one per row.
    rows: Vec<f64>,
    /// Each row is a full axis-2 (e.g. elevation) table.
    row_tables: Vec<InterpTable<V>>,
}

impl<V: Lerp + Copy> Table2D<V> {
    pub fn with_capacity(n_rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(n_rows),
            row_tables: Vec::with_capacity(n_rows),
        }
    }

    /// Insert one full row (ascending axis-1 key plus its axis-2 table).
    /// Rows must be inserted in ascending axis-1 order.
    pub fn push_row(&mut self, axis1_key: f64, row: InterpTable<V>) {
        debug_assert!(
            self.rows.last().is_none_or(|&last| axis1_key > last),
            "Table2D rows must be inserted in ascending order"
        );
        self.rows.push(axis1_key);
        self.row_tables.push(row);
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows.len() < 2 {
            return Err(FormatError::range_invariant(format!(
                "2-D table needs at least 2 rows, has {}",
                self.rows.len()
            )));
        }
        for row in &self.row_tables {
            row.validate()?;
        }
        Ok(())
    }

    /// Iterate the per-axis-1-key row tables, for callers that need to
    /// scan every stored sample (e.g. a min/max scan over a value type
    /// with no closed-form extremum).
    pub fn row_tables(&self) -> impl Iterator<Item = &InterpTable<V>> {
        self.row_tables.iter()
    }

    /// Bilinear lookup: interpolate each bracketing row in axis-2, then
    /// interpolate the two row results in axis-1.
    pub fn lookup(&self, axis1: f64, axis2: f64) -> V {
        let n = self.rows.len();
        debug_assert!(n >= 2, "Table2D::lookup requires at least two rows");
        if axis1 <= self.rows[0] {
            return self.row_tables[0].lookup(axis2);
        }
        if axis1 >= self.rows[n - 1] {
            return self.row_tables[n - 1].lookup(axis2);
        }
        let idx = match self
            .rows
            .binary_search_by(|k| k.partial_cmp(&axis1).expect("table key must not be NaN"))
        {
            Ok(idx) => return self.row_tables[idx].lookup(axis2),
            Err(idx) => idx,
        };
        let (k0, k1) = (self.rows[idx - 1], self.rows[idx]);
        let v0 = self.row_tables[idx - 1].lookup(axis2);
        let v1 = self.row_tables[idx].lookup(axis2);
        let t = (axis1 - k0) / (k1 - k0);
        V::lerp(v0, v1, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_table() -> InterpTable<f64> {
        let mut t = InterpTable::new();
        t.insert(0.0, 0.0);
        t.insert(10.0, 20.0);
        t.insert(5.0, 10.0);
        t
    }

    #[test]
    fn insert_keeps_keys_sorted() {
        let t = sample_table();
        assert_eq!(t.bounds(), Some((0.0, 10.0)));
    }

    #[test]
    fn duplicate_key_overwrites() {
        let mut t = sample_table();
        t.insert(5.0, 999.0);
        assert_relative_eq!(t.lookup(5.0), 999.0);
    }

    #[test]
    fn lookup_interpolates_linearly() {
        let t = sample_table();
        assert_relative_eq!(t.lookup(2.5), 5.0);
        assert_relative_eq!(t.lookup(7.5), 15.0);
    }

    #[test]
    fn lookup_clamps_outside_range() {
        let t = sample_table();
        assert_relative_eq!(t.lookup(-100.0), 0.0);
        assert_relative_eq!(t.lookup(100.0), 20.0);
    }

    #[test]
    fn extremes_returns_min_and_max() {
        let t = sample_table();
        assert_eq!(t.extremes(), Some((0.0, 20.0)));
    }

    #[test]
    fn validate_rejects_fewer_than_two_samples() {
        let mut t: InterpTable<f64> = InterpTable::new();
        assert!(t.validate().is_err());
        t.insert(0.0, 1.0);
        assert!(t.validate().is_err());
        t.insert(1.0, 2.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn symmetry_from_code_rejects_unknown() {
        assert!(Symmetry::from_code(3).is_err());
        assert!(matches!(Symmetry::from_code(2), Ok(Symmetry::Mirror)));
    }

    #[test]
    fn mirror_symmetry_folds_negative_keys() {
        let mut t = SymmetricTable::new(Symmetry::Mirror);
        t.insert(0.0, 0.0);
        t.insert(1.0, -3.0);
        assert_relative_eq!(t.lookup(1.0), t.lookup(-1.0));
    }

    #[test]
    fn quadrant_symmetry_folds_into_first_quadrant() {
        use std::f64::consts::PI;
        let mut t = SymmetricTable::new(Symmetry::Quadrant);
        t.insert(0.0, 0.0);
        t.insert(PI / 2.0, -10.0);
        // pi - 0.2 folds to 0.2, same as -0.2 folding to 0.2.
        assert_relative_eq!(t.lookup(PI - 0.2), t.lookup(0.2), epsilon = 1e-9);
        assert_relative_eq!(t.lookup(-0.2), t.lookup(0.2), epsilon = 1e-9);
    }

    #[test]
    fn complex_lerp_is_componentwise() {
        let a = Complex::new(0.0, 0.0);
        let b = Complex::new(2.0, 4.0);
        let mid = Complex::lerp(a, b, 0.5);
        assert_relative_eq!(mid.re, 1.0);
        assert_relative_eq!(mid.im, 2.0);
    }

    #[test]
    fn values_iterates_in_key_order() {
        let t = sample_table();
        assert_eq!(t.values().collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn table2d_bilinear_interpolates_both_axes() {
        let mut t: Table2D<f64> = Table2D::with_capacity(2);
        let mut row0 = InterpTable::new();
        row0.insert(0.0, 0.0);
        row0.insert(10.0, 10.0);
        let mut row1 = InterpTable::new();
        row1.insert(0.0, 20.0);
        row1.insert(10.0, 30.0);
        t.push_row(0.0, row0);
        t.push_row(10.0, row1);

        assert_relative_eq!(t.lookup(0.0, 0.0), 0.0);
        assert_relative_eq!(t.lookup(10.0, 10.0), 30.0);
        assert_relative_eq!(t.lookup(5.0, 5.0), 15.0);
    }
}
