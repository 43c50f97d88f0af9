//! Legacy three-point solver, the fallback path for small series
//!
//! Not textbook bisection: the scheme tracks `(rate, lower, upper)`,
//! halves toward one bound on each round, and grows the upper window
//! by 1 whenever the rate runs into it.

use log::trace;

use super::{present_value, round_to, MAX_TRIES};
use crate::cashflow::NormalizedFlows;
use crate::error::XirrError;

/// Runs the interval-narrowing iteration from `guess` inside the
/// initial window `(-1.0, +1.0)`.
///
/// The residual is corrected by the sign of the first chronological
/// amount only. That asymmetry is inherited behavior, kept for
/// compatibility even though it is not obviously right for every
/// cash-flow shape.
pub(crate) fn solve(flows: &NormalizedFlows, guess: f64) -> Result<f64, XirrError> {
    let first_sign = flows
        .first_amount_sign()
        .ok_or_else(|| XirrError::computation("no non-zero cash flows to solve over"))?;

    let mut rate = guess;
    let mut lower = -1.0_f64;
    let mut upper = 1.0_f64;
    // Last signed residual; seeded non-zero so the first check passes
    let mut residual = 1.0_f64;
    let mut tries: u32 = 0;

    loop {
        if residual == 0.0 {
            return Ok(round_to(rate, 6));
        }
        if rate == -1.0 {
            return Err(XirrError::CouldNotConverge { tries });
        }
        if tries >= MAX_TRIES {
            return Err(XirrError::GaveUp { tries });
        }

        residual = round_to(first_sign * present_value(&flows.active, rate)?, 4);

        if residual > 0.0 {
            // Rate overshoots: halve toward the lower bound
            let next = (lower + rate) / 2.0;
            upper = rate;
            rate = next;
        } else if residual < 0.0 {
            // Rate undershoots: halve toward the upper bound, growing
            // the window when the rate has nearly reached it
            let next = (rate + upper) / 2.0;
            if round_to(upper - rate, 2) == 0.0 {
                upper += 1.0;
            }
            lower = rate;
            rate = next;
        }
        // A zero residual leaves the triple unchanged and converges on
        // the next check
        tries += 1;

        trace!(
            "legacy try {}: rate {:.6}, window ({:.6}, {:.6}), residual {:.4}",
            tries,
            rate,
            lower,
            upper,
            residual
        );
    }
}
