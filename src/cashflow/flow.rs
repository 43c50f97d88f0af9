//! Cash-flow entries and date-to-period normalization

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::Period;
use crate::error::XirrError;

/// A single dated cash flow. Positive amounts are inflows, negative
/// amounts are outflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Cash flows reduced to period-keyed, same-day-aggregated form.
///
/// `periods` and `amounts` are the unfiltered aggregation output as
/// two parallel lists; the solver checks their sizes against each
/// other before iterating. `active` is the non-zero subset in
/// chronological order, which is the summation domain for solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFlows {
    /// Every distinct period, in chronological order.
    pub periods: Vec<Period>,
    /// Aggregated amount per period, parallel to `periods`.
    pub amounts: Vec<f64>,
    /// Periods whose aggregated amount is non-zero.
    pub active: Vec<(Period, f64)>,
}

impl NormalizedFlows {
    /// Sign of the earliest-dated aggregated amount, used by the
    /// legacy solver's residual correction.
    pub(crate) fn first_amount_sign(&self) -> Option<f64> {
        self.active.first().map(|&(_, amount)| amount.signum())
    }
}

/// Normalizes `(date, amount)` pairs into period-keyed flows.
///
/// The earliest date defines period zero; flows on the same calendar
/// day sum into one slot. Fails with [`XirrError::NoSignMix`] unless
/// the raw amounts contain at least one strictly positive and one
/// strictly negative value.
pub fn normalize(dates: &[NaiveDate], amounts: &[f64]) -> Result<NormalizedFlows, XirrError> {
    if dates.len() != amounts.len() {
        return Err(XirrError::LengthMismatch {
            dates: dates.len(),
            amounts: amounts.len(),
        });
    }

    let has_inflow = amounts.iter().any(|&a| a > 0.0);
    let has_outflow = amounts.iter().any(|&a| a < 0.0);
    if !has_inflow || !has_outflow {
        return Err(XirrError::NoSignMix);
    }

    // Sign mix guarantees the lists are non-empty
    let min_date = match dates.iter().min() {
        Some(date) => *date,
        None => return Err(XirrError::NoSignMix),
    };

    let mut flows: BTreeMap<Period, f64> = BTreeMap::new();
    for (date, amount) in dates.iter().zip(amounts) {
        let days = (*date - min_date).num_days();
        *flows.entry(Period::from_days(days)).or_insert(0.0) += amount;
    }

    let periods: Vec<Period> = flows.keys().copied().collect();
    let aggregated: Vec<f64> = flows.values().copied().collect();
    let active: Vec<(Period, f64)> = flows
        .into_iter()
        .filter(|&(_, amount)| amount != 0.0)
        .collect();

    Ok(NormalizedFlows {
        periods,
        amounts: aggregated,
        active,
    })
}
