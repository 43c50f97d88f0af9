//! Root-finding for the annualized rate of return
//!
//! Two solver paths sit behind one entry point:
//! - [`SolverKind::Newton`]: derivative-based iteration, the default
//!   for series of 10 or more entries
//! - [`SolverKind::LegacyBisection`]: three-point interval narrowing,
//!   the fallback for smaller series
//!
//! Both consume the same [`crate::cashflow::NormalizedFlows`] and
//! evaluate their discounted sums as parallel map/reduce passes, one
//! task per cash flow. Addition commutes, so completion order never
//! matters; a non-finite term fails the whole reduction.

pub(crate) mod guess;
mod legacy;
mod newton;

use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;

use crate::cashflow::{normalize, CashFlow, Period};
use crate::error::XirrError;

/// Series shorter than this dispatch to the legacy solver.
pub const LEGACY_CUTOFF: usize = 10;

/// Hard cap on solver iterations.
pub(crate) const MAX_TRIES: u32 = 300;

/// Root-finding strategy for [`xirr_with_solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Newton-Raphson iteration with an analytic derivative.
    Newton,
    /// Three-point interval narrowing inherited from the legacy
    /// implementation.
    LegacyBisection,
}

impl SolverKind {
    /// The dispatch policy: small series take the legacy path.
    pub fn for_series_len(len: usize) -> Self {
        if len < LEGACY_CUTOFF {
            Self::LegacyBisection
        } else {
            Self::Newton
        }
    }

    /// Seed-rate rounding precision; the two paths intentionally
    /// differ.
    fn guess_digits(self) -> i32 {
        match self {
            Self::Newton => 6,
            Self::LegacyBisection => 3,
        }
    }
}

/// Computes the annualized internal rate of return for an irregular
/// series of dated cash flows.
///
/// `dates` and `amounts` pair up positionally; order is irrelevant.
/// Flows on the same calendar day are aggregated before solving.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use xirr_engine::xirr;
///
/// let dates = [
///     NaiveDate::from_ymd_opt(1985, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
/// ];
/// let rate = xirr(&dates, &[1000.0, -600.0, -200.0]).unwrap();
/// assert!(rate < 0.0);
/// ```
pub fn xirr(dates: &[NaiveDate], amounts: &[f64]) -> Result<f64, XirrError> {
    xirr_with_solver(dates, amounts, SolverKind::for_series_len(dates.len()))
}

/// Computes XIRR with an explicit solver strategy.
///
/// [`xirr`] applies the size-based dispatch policy; this entry point
/// exists so both paths can be exercised on the same fixtures.
pub fn xirr_with_solver(
    dates: &[NaiveDate],
    amounts: &[f64],
    solver: SolverKind,
) -> Result<f64, XirrError> {
    if dates.len() != amounts.len() {
        return Err(XirrError::LengthMismatch {
            dates: dates.len(),
            amounts: amounts.len(),
        });
    }

    let flows = normalize(dates, amounts)?;

    // The period and amount lists come out of one aggregation pass; a
    // size difference means the bookkeeping itself is broken
    if flows.periods.len() != flows.amounts.len() {
        return Err(XirrError::computation(
            "period and amount counts diverged during aggregation",
        ));
    }
    if flows.periods.len() < 2 {
        return Err(XirrError::computation(
            "at least two distinct cash-flow dates are required",
        ));
    }
    if flows.active.is_empty() {
        return Err(XirrError::computation("all cash flows cancel to zero"));
    }

    let seed = guess::initial_guess(&flows, solver.guess_digits())?;
    debug!(
        "xirr: {:?} over {} active periods, seed rate {:.6}",
        solver,
        flows.active.len(),
        seed
    );

    match solver {
        SolverKind::Newton => newton::solve(&flows, seed),
        SolverKind::LegacyBisection => legacy::solve(&flows, seed),
    }
}

/// Convenience wrapper over [`xirr`] for a slice of [`CashFlow`]
/// entries.
pub fn xirr_series(flows: &[CashFlow]) -> Result<f64, XirrError> {
    let dates: Vec<NaiveDate> = flows.iter().map(|flow| flow.date).collect();
    let amounts: Vec<f64> = flows.iter().map(|flow| flow.amount).collect();
    xirr(&dates, &amounts)
}

/// Discounted sum of the active flows at `rate`:
/// `Σ amount / (1+rate)^period`, one parallel task per entry.
pub(crate) fn present_value(active: &[(Period, f64)], rate: f64) -> Result<f64, XirrError> {
    let one_plus_rate = 1.0 + rate;
    active
        .par_iter()
        .map(|&(period, amount)| {
            let term = amount / period.signed_powf(one_plus_rate);
            if term.is_finite() {
                Ok(term)
            } else {
                Err(XirrError::computation(format!(
                    "non-finite discount term at period {}/{}",
                    period.numerator, period.denominator
                )))
            }
        })
        .sum()
}

/// Rounds to a fixed number of decimal places.
///
/// Both solvers use "rounds to zero at fixed precision" as their
/// termination predicate, so the precision is part of the algorithm,
/// not cosmetics.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Inflow-first series: 10 units out to the borrower, 11 annual
    /// repayments of 1.1 back. Kept at small magnitudes so the legacy
    /// path's absolute residual rounding converges well inside its
    /// try cap.
    fn loan_series() -> (Vec<NaiveDate>, Vec<f64>) {
        let mut dates = vec![date(2000, 1, 1)];
        let mut amounts = vec![10.0];
        for year in 2001..=2011 {
            dates.push(date(year, 1, 1));
            amounts.push(-1.1);
        }
        (dates, amounts)
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(0.6329931, 6), 0.632993, epsilon = 1e-12);
        assert_relative_eq!(round_to(0.6329931, 3), 0.633, epsilon = 1e-12);
        assert_relative_eq!(round_to(-0.00004, 4), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected_before_anything_else() {
        // All-positive amounts would be NoSignMix, but the length
        // check wins
        let dates = [date(2020, 1, 1), date(2021, 1, 1)];
        let result = xirr(&dates, &[100.0, 200.0, 300.0]);
        assert_eq!(
            result,
            Err(XirrError::LengthMismatch {
                dates: 2,
                amounts: 3
            })
        );
    }

    #[test]
    fn test_one_sided_flows_rejected() {
        let dates = [date(2020, 1, 1), date(2021, 1, 1)];
        assert_eq!(xirr(&dates, &[100.0, 200.0]), Err(XirrError::NoSignMix));
        assert_eq!(xirr(&dates, &[-100.0, -200.0]), Err(XirrError::NoSignMix));
    }

    #[test]
    fn test_single_distinct_date_is_a_computation_error() {
        let dates = [date(2020, 1, 1), date(2020, 1, 1)];
        let result = xirr(&dates, &[100.0, -40.0]);
        assert!(matches!(result, Err(XirrError::Computation { .. })));
    }

    #[test]
    fn test_fully_cancelling_flows_are_a_computation_error() {
        let dates = [
            date(2020, 1, 1),
            date(2020, 1, 1),
            date(2021, 1, 1),
            date(2021, 1, 1),
        ];
        let result = xirr(&dates, &[100.0, -100.0, 50.0, -50.0]);
        assert!(matches!(result, Err(XirrError::Computation { .. })));
    }

    #[test]
    fn test_negative_rate_three_flow_series() {
        init_logs();
        let dates = [date(1985, 1, 1), date(1990, 1, 1), date(1995, 1, 1)];
        let rate = xirr(&dates, &[1000.0, -600.0, -200.0]).unwrap();
        assert!((rate - (-0.034592)).abs() < 5e-5, "rate = {}", rate);
    }

    #[test]
    fn test_short_loan_with_a_very_large_root() {
        // Borrow 1M mid-year, repay 3M within months: the root is a
        // very large rate the legacy window has to grow out to, and
        // the try cap is a legitimate outcome on the way
        let dates = [date(2015, 11, 1), date(2015, 10, 1), date(2015, 6, 1)];
        match xirr(&dates, &[-800_000.0, -2_200_000.0, 1_000_000.0]) {
            Ok(rate) => assert_relative_eq!(rate, 21.118359, max_relative = 1e-3),
            Err(XirrError::GaveUp { .. }) | Err(XirrError::CouldNotConverge { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let forward = xirr(
            &[date(1985, 1, 1), date(1990, 1, 1), date(1995, 1, 1)],
            &[1000.0, -600.0, -200.0],
        )
        .unwrap();
        let shuffled = xirr(
            &[date(1995, 1, 1), date(1985, 1, 1), date(1990, 1, 1)],
            &[-200.0, 1000.0, -600.0],
        )
        .unwrap();
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_same_day_flows_equal_their_sum() {
        let split = xirr(
            &[date(2019, 1, 1), date(2019, 1, 1), date(2020, 1, 1)],
            &[60.0, 40.0, -110.0],
        )
        .unwrap();
        let merged = xirr(&[date(2019, 1, 1), date(2020, 1, 1)], &[100.0, -110.0]).unwrap();
        assert_eq!(split, merged);
    }

    #[test]
    fn test_dispatch_policy() {
        assert_eq!(SolverKind::for_series_len(3), SolverKind::LegacyBisection);
        assert_eq!(SolverKind::for_series_len(9), SolverKind::LegacyBisection);
        assert_eq!(SolverKind::for_series_len(10), SolverKind::Newton);
    }

    #[test]
    fn test_solver_paths_agree_on_a_shared_series() {
        init_logs();
        let (dates, amounts) = loan_series();

        // 12 entries: xirr itself takes the Newton path
        let newton = xirr(&dates, &amounts).unwrap();
        let legacy = xirr_with_solver(&dates, &amounts, SolverKind::LegacyBisection).unwrap();

        assert!((newton - legacy).abs() < 0.01, "{} vs {}", newton, legacy);
    }

    #[test]
    fn test_solved_rate_zeroes_the_discounted_sum() {
        let (dates, amounts) = loan_series();
        let rate = xirr(&dates, &amounts).unwrap();

        let flows = normalize(&dates, &amounts).unwrap();
        let residual = present_value(&flows.active, rate).unwrap();
        assert!(residual.abs() < 0.5, "residual = {}", residual);
    }

    #[test]
    fn test_xirr_series_matches_parallel_lists() {
        let flows = [
            CashFlow::new(date(2019, 1, 1), 100.0),
            CashFlow::new(date(2020, 1, 1), -110.0),
        ];
        let from_struct = xirr_series(&flows).unwrap();
        let from_lists = xirr(&[date(2019, 1, 1), date(2020, 1, 1)], &[100.0, -110.0]).unwrap();
        assert_eq!(from_struct, from_lists);
        assert_relative_eq!(from_struct, 0.1, epsilon = 1e-5);
    }
}
