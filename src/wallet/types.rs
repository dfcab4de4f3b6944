//! Chain identifiers and wallet error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported chains, one payout address each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    /// Every supported chain, in display order.
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    /// Lower-case chain name.
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }

    /// Ticker of the chain's native asset, as quoted by rate sources.
    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Solana => "SOL",
            Chain::Ethereum => "ETH",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = WalletError;

    /// Accepts the chain name or its ticker, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Chain::ALL
            .into_iter()
            .find(|chain| {
                needle.eq_ignore_ascii_case(chain.name()) || needle.eq_ignore_ascii_case(chain.symbol())
            })
            .ok_or_else(|| WalletError::UnknownChain(s.to_string()))
    }
}

/// A stored payout address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAddress {
    pub chain: Chain,
    /// Opaque address string; format is not checked.
    pub address: String,
}

/// Errors raised by wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Chain name did not match any supported chain.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
}
