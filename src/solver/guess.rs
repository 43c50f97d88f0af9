//! Seed-rate heuristic from the extreme cash-flow magnitudes

use super::round_to;
use crate::cashflow::NormalizedFlows;
use crate::error::XirrError;

/// Produces the starting rate for iterative solving.
///
/// `guess = (1 + |max/min|)^(1/(periods - 1)) - 1`, rounded to the
/// path-specific precision (6 decimals primary, 3 legacy). The guess
/// is a heuristic only and is not guaranteed to bracket the root; the
/// solvers own divergence and give-up handling.
pub(crate) fn initial_guess(flows: &NormalizedFlows, digits: i32) -> Result<f64, XirrError> {
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for &amount in &flows.amounts {
        min_value = min_value.min(amount);
        max_value = max_value.max(amount);
    }

    // Callers guarantee at least two distinct periods
    let exponent = 1.0 / (flows.periods.len() as f64 - 1.0);
    let multiple = 1.0 + (max_value / min_value).abs();
    let guess = multiple.powf(exponent) - 1.0;

    if !guess.is_finite() {
        return Err(XirrError::computation("initial rate guess is not finite"));
    }

    Ok(round_to(guess, digits))
}
