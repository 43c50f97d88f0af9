//! XIRR Engine - Annualized internal rate of return for irregularly dated cash flows
//!
//! This library provides:
//! - Date-to-period normalization with exact day-count/365 rationals
//! - A seed-rate heuristic from the extreme cash-flow magnitudes
//! - A Newton-Raphson primary solver and a legacy three-point fallback
//! - Parallel evaluation of the discounted-sum reductions
//! - Conversion of an annualized rate into a period-specific return

pub mod cashflow;
pub mod convert;
pub mod error;
pub mod solver;

// Re-export commonly used types
pub use cashflow::{load_cash_flows, load_cash_flows_from_reader, CashFlow, Period};
pub use convert::absolute_rate;
pub use error::XirrError;
pub use solver::{xirr, xirr_series, xirr_with_solver, SolverKind, LEGACY_CUTOFF};
