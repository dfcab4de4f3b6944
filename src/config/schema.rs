//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Payout wallet addresses.
    pub wallets: WalletConfig,

    /// Exchange-rate source settings.
    pub rates: RateSourceConfig,

    /// Retry configuration for rate lookups.
    pub retries: RetryConfig,

    /// Revenue ledger settings.
    pub ledger: LedgerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet addresses, at most one per chain.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Solana payout address.
    pub solana: Option<String>,

    /// Ethereum payout address.
    pub ethereum: Option<String>,
}

/// Which rate source implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateProvider {
    /// Coinbase-style HTTP exchange-rate endpoint.
    #[default]
    Coinbase,
    /// Fixed table from `rates.static_rates`.
    Static,
}

/// How a fetched rate is applied to a source amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateDirection {
    /// `amount / rate`.
    #[default]
    Divide,
    /// `amount * rate`.
    Multiply,
}

/// Exchange-rate source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateSourceConfig {
    /// Provider implementation.
    pub provider: RateProvider,

    /// Exchange-rate endpoint URL (queried with `?currency=<source>`).
    pub endpoint: String,

    /// Currency revenue amounts are denominated in.
    pub source_currency: String,

    /// Deadline for a single rate lookup in seconds.
    pub timeout_secs: u64,

    /// Rate application direction.
    pub direction: RateDirection,

    /// Rates served by the static provider (code -> rate).
    pub static_rates: BTreeMap<String, f64>,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            provider: RateProvider::Coinbase,
            endpoint: "https://api.coinbase.com/v2/exchange-rates".to_string(),
            source_currency: "CAD".to_string(),
            timeout_secs: 10,
            direction: RateDirection::Divide,
            static_rates: BTreeMap::new(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Revenue ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Currency ledger entries are recorded in.
    pub base_currency: String,

    /// Currency balances are additionally reported in.
    pub display_currency: String,

    /// Multiplier from base to display currency.
    pub display_rate: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            display_currency: "CAD".to_string(),
            display_rate: 1.36,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
