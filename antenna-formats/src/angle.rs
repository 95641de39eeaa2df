//! Angle normalization and dB/linear conversion helpers.
//!
//! These are small, pure functions; every pattern model and table lookup
//! normalizes its inputs through them before doing any interpolation.

use std::f64::consts::PI;

/// "No signal" sentinel, in dB. Chosen sufficiently negative that
/// `db2lin(SMALL_DB)` rounds to zero for any practical power budget.
pub const SMALL_DB: f32 = -300.0;

/// Lower bound on linear power passed to `lin2db`, chosen so that
/// `lin2db(0.0) == SMALL_DB` exactly.
const LIN2DB_EPS: f64 = 1e-30;

/// Fold `x` (radians) into `(-pi, pi]`.
pub fn wrap_pi(x: f64) -> f64 {
    let y = (x + PI).rem_euclid(2.0 * PI) - PI;
    if y <= -PI { y + 2.0 * PI } else { y }
}

/// Fold `x` (radians) into `[0, 2*pi)`.
pub fn wrap_2pi(x: f64) -> f64 {
    x.rem_euclid(2.0 * PI)
}

/// Clamp `x` (radians) into `[-pi/2, pi/2]`, reflecting past the poles
/// rather than wrapping (elevation has no "other side").
pub fn wrap_pi_over_2(x: f64) -> f64 {
    let half = PI / 2.0;
    let folded = wrap_pi(x);
    if folded > half {
        PI - folded
    } else if folded < -half {
        -PI - folded
    } else {
        folded
    }
}

/// Convert a gain in dB to a linear power ratio.
pub fn db2lin(g: f64) -> f64 {
    10f64.powf(g / 10.0)
}

/// Convert a linear power ratio to dB, clamping the argument away from
/// zero so the result never produces `-inf`.
pub fn lin2db(p: f64) -> f64 {
    10.0 * p.max(LIN2DB_EPS).log10()
}

/// Magnitude of a complex sample expressed in dB, via `hypot` for
/// numeric stability (used by the Monopulse sum/difference channels).
pub fn complex_magnitude_db(re: f64, im: f64) -> f64 {
    20.0 * re.hypot(im).max(LIN2DB_EPS.sqrt()).log10()
}

/// Replace a non-finite or implausibly small result with `SMALL_DB`.
/// Every tabulated query clamps through this before returning.
pub fn clamp_small_db(x: f32) -> f32 {
    if x.is_finite() {
        x.max(SMALL_DB)
    } else {
        SMALL_DB
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_pi_folds_into_range() {
        assert_relative_eq!(wrap_pi(0.0), 0.0);
        assert_relative_eq!(wrap_pi(PI), PI);
        assert_relative_eq!(wrap_pi(-PI), PI);
        assert_relative_eq!(wrap_pi(3.0 * PI), PI, epsilon = 1e-9);
        assert_relative_eq!(wrap_pi(2.0 * PI), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn wrap_pi_is_periodic() {
        for i in -5..5 {
            let x = 0.73 + i as f64 * 2.0 * PI;
            assert_relative_eq!(wrap_pi(x), wrap_pi(0.73), epsilon = 1e-9);
        }
    }

    #[test]
    fn wrap_2pi_stays_nonnegative() {
        assert_relative_eq!(wrap_2pi(-0.1), 2.0 * PI - 0.1, epsilon = 1e-9);
        assert_relative_eq!(wrap_2pi(0.0), 0.0);
    }

    #[test]
    fn wrap_pi_over_2_reflects_past_poles() {
        let half = PI / 2.0;
        assert_relative_eq!(wrap_pi_over_2(half + 0.1), half - 0.1, epsilon = 1e-9);
        assert_relative_eq!(wrap_pi_over_2(-half - 0.1), -half + 0.1, epsilon = 1e-9);
        assert_relative_eq!(wrap_pi_over_2(0.2), 0.2);
    }

    #[test]
    fn db_roundtrip() {
        assert_relative_eq!(lin2db(db2lin(13.7)), 13.7, epsilon = 1e-9);
        assert_relative_eq!(db2lin(0.0), 1.0);
    }

    #[test]
    fn lin2db_of_zero_is_small_db() {
        assert!(lin2db(0.0) <= SMALL_DB as f64);
    }

    #[test]
    fn clamp_small_db_replaces_nan_and_inf() {
        assert_eq!(clamp_small_db(f32::NAN), SMALL_DB);
        assert_eq!(clamp_small_db(f32::NEG_INFINITY), SMALL_DB);
        assert_eq!(clamp_small_db(-500.0), SMALL_DB);
        assert_eq!(clamp_small_db(-10.0), -10.0);
    }
}
