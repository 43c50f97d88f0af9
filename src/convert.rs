//! Conversion of an annualized rate into the return realized over a
//! specific number of days

use crate::error::XirrError;
use crate::solver::round_to;

/// Converts an annualized rate into the percentage return actually
/// realized over `days`.
///
/// Periods shorter than a year compound the annual rate down to the
/// elapsed fraction; longer periods report the annual rate itself.
/// The result is a percentage rounded to 2 decimals.
///
/// Fails with [`XirrError::ZeroRate`] for a literal zero rate, and
/// with a computation error when the compounding falls outside the
/// real domain (a rate at or below -1.0 over a partial year).
pub fn absolute_rate(rate: f64, days: i64) -> Result<f64, XirrError> {
    if rate == 0.0 {
        return Err(XirrError::ZeroRate);
    }

    if days < 365 {
        let compounded = (1.0 + rate).powf(days as f64 / 365.0) - 1.0;
        if !compounded.is_finite() {
            return Err(XirrError::computation(
                "partial-year compounding left the real domain",
            ));
        }
        Ok(round_to(compounded * 100.0, 2))
    } else {
        Ok(round_to(rate * 100.0, 2))
    }
}
