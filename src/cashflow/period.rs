//! Exact rational time periods
//!
//! A cash flow's time offset from the earliest date in its series is
//! kept as an exact `days/365` pair rather than a float so that two
//! flows landing on the same calendar day key the same aggregation
//! slot bit-for-bit.

use serde::{Deserialize, Serialize};

/// Days in the fixed year used for annualization.
pub const DAYS_IN_YEAR: i64 = 365;

/// A time offset in years, stored as an exact `numerator/denominator`
/// rational.
///
/// The fraction is never reduced to lowest terms: identity (equality,
/// hashing, ordering) is the exact field pair. Periods are always
/// built as `day_count/365`, so ordering by numerator is chronological
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Period {
    /// Day count (may be negative for derived exponents).
    pub numerator: i64,
    /// Always positive; 365 for periods built from dates.
    pub denominator: i64,
}

impl Period {
    /// Creates a period from an exact numerator/denominator pair.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator > 0, "period denominator must be positive");
        Self {
            numerator,
            denominator,
        }
    }

    /// Creates the period for a flow `days` after the series start.
    pub fn from_days(days: i64) -> Self {
        Self::new(days, DAYS_IN_YEAR)
    }

    /// Returns the period with its numerator sign flipped.
    pub fn negate(self) -> Self {
        Self::new(-self.numerator, self.denominator)
    }

    /// Converts the exact fraction to a float.
    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Raises `base` to this rational exponent.
    ///
    /// For a negative base the magnitude is raised first and the sign
    /// is restored from the numerator's parity: the exponent is
    /// structurally `n/365`, so `(-b)^(n/365) = |b|^(n/365) * (-1)^n`.
    pub fn signed_powf(self, base: f64) -> f64 {
        if base < 0.0 {
            let magnitude = base.abs().powf(self.as_f64());
            if self.numerator % 2 == 0 {
                magnitude
            } else {
                -magnitude
            }
        } else {
            base.powf(self.as_f64())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_is_exact_pair() {
        assert_eq!(Period::from_days(730), Period::from_days(730));
        // 2/365 and 4/730 are the same quantity but different slots
        assert_ne!(Period::new(2, 365), Period::new(4, 730));
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut periods = vec![
            Period::from_days(365),
            Period::from_days(0),
            Period::from_days(31),
        ];
        periods.sort();
        assert_eq!(periods[0], Period::from_days(0));
        assert_eq!(periods[2], Period::from_days(365));
    }

    #[test]
    fn test_negate_and_as_f64() {
        let period = Period::from_days(730);
        assert_relative_eq!(period.as_f64(), 2.0, epsilon = 1e-12);
        assert_eq!(period.negate(), Period::new(-730, 365));
        assert_relative_eq!(period.negate().as_f64(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_powf_positive_base() {
        let period = Period::from_days(730);
        assert_relative_eq!(period.signed_powf(1.5), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_powf_negative_base_even_numerator() {
        let period = Period::new(730, 365);
        assert_relative_eq!(period.signed_powf(-2.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_powf_negative_base_odd_numerator() {
        let period = Period::new(365, 365);
        assert_relative_eq!(period.signed_powf(-2.0), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_powf_negative_exponent_parity() {
        // -1095/365 is an odd numerator: sign carries through inversion
        let period = Period::new(-1095, 365);
        assert_relative_eq!(period.signed_powf(-2.0), -0.125, epsilon = 1e-12);
    }
}
