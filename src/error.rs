//! Error types for XIRR computation

use thiserror::Error;

/// Errors that can occur while solving for a rate of return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XirrError {
    /// Date and amount collections have different lengths.
    #[error("date and amount collections must be the same size ({dates} dates, {amounts} amounts)")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of amounts supplied.
        amounts: usize,
    },

    /// All cash flows share one sign, so no rate of return exists.
    #[error("cash flows must include at least one positive and one negative amount")]
    NoSignMix,

    /// The iterate reached the degenerate rate of -1.0.
    #[error("could not converge: rate collapsed to -1.0 after {tries} iterations")]
    CouldNotConverge {
        /// Iterations completed before the collapse.
        tries: u32,
    },

    /// The iteration cap was exhausted without convergence.
    #[error("unable to converge within {tries} iterations")]
    GaveUp {
        /// The iteration cap that was reached.
        tries: u32,
    },

    /// `absolute_rate` was called with a zero rate.
    #[error("rate must be non-zero")]
    ZeroRate,

    /// An unexpected numeric-domain fault.
    #[error("computation failed: {reason}")]
    Computation {
        /// Description of the fault.
        reason: String,
    },
}

impl XirrError {
    /// Creates a generic computation failure.
    pub(crate) fn computation(reason: impl Into<String>) -> Self {
        Self::Computation {
            reason: reason.into(),
        }
    }
}
