//! Revenue splitting and the in-memory revenue ledger.
//!
//! Every amount handled here must be finite and non-negative. The split
//! policy is fixed at 50/50.

pub mod ledger;
pub mod split;

pub use ledger::{BalanceSummary, LedgerEntry, RevenueLedger};
pub use split::{split_revenue, SplitResult};

use thiserror::Error;

/// Errors raised by revenue operations.
#[derive(Debug, Error)]
pub enum RevenueError {
    /// Amount is negative, NaN or infinite.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for revenue operations.
pub type Result<T> = std::result::Result<T, RevenueError>;

pub(crate) fn ensure_non_negative(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RevenueError::InvalidInput(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}
