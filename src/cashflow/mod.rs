//! Cash-flow entries and their normalization into exact rational periods

mod flow;
mod loader;
mod period;

pub use flow::{normalize, CashFlow, NormalizedFlows};
pub use loader::{load_cash_flows, load_cash_flows_from_reader};
pub use period::{Period, DAYS_IN_YEAR};
