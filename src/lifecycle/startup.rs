//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Initialize components in dependency order
//! - Provide the example revenue flow as an explicit entry point
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Components initialize in order, not concurrently

use serde::Serialize;
use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{AppConfig, ConfigError};
use crate::rates::{ConfiguredRateSource, Conversion, RateError, RevenueConverter};
use crate::revenue::{split_revenue, RevenueError, RevenueLedger, SplitResult};
use crate::wallet::{Chain, ChainAddress, WalletError, WalletRegistry};

/// Errors surfaced by the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Revenue(#[from] RevenueError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Outcome of the example revenue flow.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleReport {
    pub revenue: f64,
    pub currency: String,
    pub wallets: Vec<ChainAddress>,
    pub conversions: Vec<Conversion>,
    pub split: SplitResult,
    pub payouts: Vec<WalletPayout>,
}

/// One chain's share of a split and where it would be paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletPayout {
    pub chain: Chain,
    /// `None` when no address is set for the chain.
    pub address: Option<String>,
    pub share: f64,
}

/// Result of looking up one chain's address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletLookup {
    pub chain: Chain,
    pub address: Option<String>,
}

/// All components, wired from one configuration.
#[derive(Debug)]
pub struct Application {
    pub(crate) config: AppConfig,
    pub(crate) registry: WalletRegistry,
    pub(crate) converter: RevenueConverter<ConfiguredRateSource>,
    pub(crate) ledger: RevenueLedger,
}

impl Application {
    /// Validate `config` and build every component.
    pub fn bootstrap(config: AppConfig) -> Result<Self, AppError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let registry = WalletRegistry::from_config(&config.wallets);
        let source = ConfiguredRateSource::from_config(&config.rates)?;
        let converter = RevenueConverter::new(source, &config.rates.source_currency)
            .with_direction(config.rates.direction)
            .with_retries(config.retries.clone());
        let ledger = RevenueLedger::new(config.ledger.clone());

        tracing::info!(
            source_currency = %converter.source_currency(),
            wallets = registry.len(),
            "Application initialized"
        );

        Ok(Self {
            config,
            registry,
            converter,
            ledger,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &WalletRegistry {
        &self.registry
    }

    /// Look up the address for a chain given by name or ticker.
    pub fn wallet(&self, chain: &str) -> Result<WalletLookup, AppError> {
        let chain: Chain = chain.parse()?;
        Ok(WalletLookup {
            chain,
            address: self.registry.get_address(chain),
        })
    }

    pub fn converter(&self) -> &RevenueConverter<ConfiguredRateSource> {
        &self.converter
    }

    pub fn ledger(&self) -> &RevenueLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut RevenueLedger {
        &mut self.ledger
    }

    /// Convert `revenue` into every chain's asset and split it between wallets.
    ///
    /// Conversions run concurrently; the first failure aborts the flow.
    pub async fn run_example(&self, revenue: f64) -> Result<ExampleReport, AppError> {
        let symbols: Vec<&str> = Chain::ALL.iter().map(|chain| chain.symbol()).collect();
        let conversions = self
            .converter
            .convert_many(revenue, &symbols)
            .await
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>, _>>()?;
        let split = split_revenue(revenue)?;
        let payouts = Chain::ALL
            .into_iter()
            .map(|chain| WalletPayout {
                chain,
                address: self.registry.get_address(chain),
                share: split.share(chain),
            })
            .collect();

        Ok(ExampleReport {
            revenue,
            currency: self.converter.source_currency().to_string(),
            wallets: self.registry.addresses(),
            conversions,
            split,
            payouts,
        })
    }
}
