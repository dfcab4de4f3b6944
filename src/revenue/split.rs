//! 50/50 revenue split between the Solana and Ethereum wallets.

use serde::{Deserialize, Serialize};

use crate::observability::metrics;
use crate::revenue::{ensure_non_negative, Result};
use crate::wallet::Chain;

/// Share of a revenue total credited to each wallet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub solana: f64,
    pub ethereum: f64,
}

impl SplitResult {
    /// Share for `chain`.
    pub fn share(&self, chain: Chain) -> f64 {
        match chain {
            Chain::Solana => self.solana,
            Chain::Ethereum => self.ethereum,
        }
    }
}

/// Halve a non-negative amount.
pub(crate) fn halve(total: f64) -> Result<f64> {
    ensure_non_negative(total, "revenue total").map(|total| total / 2.0)
}

/// Split `total` into two equal halves.
///
/// # Errors
///
/// - [`RevenueError::InvalidInput`](crate::revenue::RevenueError::InvalidInput)
///   if `total` is negative or not finite
pub fn split_revenue(total: f64) -> Result<SplitResult> {
    let half = halve(total)?;
    metrics::record_split();
    tracing::info!(total, share = half, "Split revenue to each wallet");
    Ok(SplitResult {
        solana: half,
        ethereum: half,
    })
}
