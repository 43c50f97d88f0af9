//! Newton-Raphson solver, the primary path for larger series

use log::trace;
use rayon::prelude::*;

use super::{present_value, round_to, MAX_TRIES};
use crate::cashflow::{NormalizedFlows, Period};
use crate::error::XirrError;

/// Steps smaller than this snap to exactly 0.0, which is the
/// convergence trigger on the following iteration.
const MAX_ERROR: f64 = 1.0e-3;

/// Runs the Newton iteration from `guess` until the step snaps to
/// zero, the rate collapses to -1.0, or the try cap is exhausted.
pub(crate) fn solve(flows: &NormalizedFlows, guess: f64) -> Result<f64, XirrError> {
    let mut rate = guess;
    // Last step magnitude; seeded non-zero so the first check passes
    let mut step = 1.0;
    let mut tries: u32 = 0;

    loop {
        if step == 0.0 {
            return Ok(round_to(rate, 6));
        }
        if rate == -1.0 {
            return Err(XirrError::CouldNotConverge { tries });
        }
        if tries >= MAX_TRIES {
            return Err(XirrError::GaveUp { tries });
        }

        let value = round_to(present_value(&flows.active, rate)?, 6);
        let derivative = round_to(derivative_at(&flows.active, rate)?, 6);

        // A negative slope points the step away from the root here;
        // hold the rate instead of stepping.
        let new_rate = if derivative < 0.0 {
            rate
        } else {
            rate - value / derivative
        };
        if !new_rate.is_finite() {
            return Err(XirrError::computation(
                "newton step produced a non-finite rate",
            ));
        }

        let magnitude = (new_rate - rate).abs();
        step = if magnitude < MAX_ERROR { 0.0 } else { magnitude };
        rate = new_rate;
        tries += 1;

        trace!(
            "newton try {}: rate {:.6}, value {:.6}, derivative {:.6}, step {:.6}",
            tries,
            rate,
            value,
            derivative,
            step
        );
    }
}

/// Derivative of the discounted sum with respect to the rate:
/// `Σ -amount * period * (1+rate)^(-period-1)`, one parallel task per
/// entry, summed after all complete.
fn derivative_at(active: &[(Period, f64)], rate: f64) -> Result<f64, XirrError> {
    let one_plus_rate = 1.0 + rate;
    active
        .par_iter()
        .map(|&(period, amount)| {
            // -period-1 keeps the 365 denominator so the negative-base
            // sign correction still keys off the numerator
            let exponent = Period::new(
                -period.numerator - period.denominator,
                period.denominator,
            );
            let term = -amount * period.as_f64() * exponent.signed_powf(one_plus_rate);
            if term.is_finite() {
                Ok(term)
            } else {
                Err(XirrError::computation(format!(
                    "non-finite derivative term at period {}/{}",
                    period.numerator, period.denominator
                )))
            }
        })
        .sum()
}
