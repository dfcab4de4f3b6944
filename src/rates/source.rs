//! Rate-source abstraction and its in-process implementations.

use std::future::Future;

use crate::config::{RateProvider, RateSourceConfig};
use crate::rates::coinbase::CoinbaseRateSource;
use crate::rates::types::{normalize_code, ExchangeRateTable, RateError, RateResult};

/// Something that can produce a rate table for a base currency.
pub trait RateSource: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &str;

    /// Fetch rates quoted against `base_currency`.
    fn fetch_rates(
        &self,
        base_currency: &str,
    ) -> impl Future<Output = RateResult<ExchangeRateTable>> + Send;
}

/// Fixed rate table for a single base currency.
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    table: ExchangeRateTable,
}

impl StaticRateSource {
    pub fn new(table: ExchangeRateTable) -> Self {
        Self { table }
    }

    /// Build from `(code, rate)` pairs.
    pub fn with_rates<I, S>(base: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        Self::new(ExchangeRateTable::from_pairs(base, pairs))
    }
}

impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_rates(&self, base_currency: &str) -> RateResult<ExchangeRateTable> {
        let requested = normalize_code(base_currency);
        if requested != self.table.base() {
            return Err(RateError::UnsupportedBase {
                requested,
                available: self.table.base().to_string(),
            });
        }
        Ok(self.table.clone())
    }
}

/// Rate source selected by `rates.provider`.
#[derive(Debug)]
pub enum ConfiguredRateSource {
    Coinbase(CoinbaseRateSource),
    Static(StaticRateSource),
}

impl ConfiguredRateSource {
    pub fn from_config(config: &RateSourceConfig) -> RateResult<Self> {
        let source = match config.provider {
            RateProvider::Coinbase => Self::Coinbase(CoinbaseRateSource::new(config)?),
            RateProvider::Static => Self::Static(StaticRateSource::with_rates(
                &config.source_currency,
                config.static_rates.iter().map(|(code, rate)| (code, *rate)),
            )),
        };
        tracing::debug!(provider = source.name(), "Rate source configured");
        Ok(source)
    }
}

impl RateSource for ConfiguredRateSource {
    fn name(&self) -> &str {
        match self {
            Self::Coinbase(source) => source.name(),
            Self::Static(source) => source.name(),
        }
    }

    async fn fetch_rates(&self, base_currency: &str) -> RateResult<ExchangeRateTable> {
        match self {
            Self::Coinbase(source) => source.fetch_rates(base_currency).await,
            Self::Static(source) => source.fetch_rates(base_currency).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_serves_its_base() {
        let source = StaticRateSource::with_rates("CAD", [("SOL", 50.0)]);
        let table = source.fetch_rates("cad").await.unwrap();
        assert_eq!(table.rate("SOL").unwrap(), 50.0);
    }

    #[tokio::test]
    async fn test_static_source_rejects_other_base() {
        let source = StaticRateSource::with_rates("CAD", [("SOL", 50.0)]);
        let err = source.fetch_rates("USD").await.unwrap_err();
        assert_eq!(err.to_string(), "Rate source serves CAD, not USD");
    }

    #[tokio::test]
    async fn test_configured_static_provider() {
        let mut config = RateSourceConfig {
            provider: RateProvider::Static,
            ..RateSourceConfig::default()
        };
        config.static_rates.insert("ETH".to_string(), 2000.0);

        let source = ConfiguredRateSource::from_config(&config).unwrap();
        assert_eq!(source.name(), "static");
        let table = source.fetch_rates("CAD").await.unwrap();
        assert_eq!(table.rate("ETH").unwrap(), 2000.0);
    }

    #[test]
    fn test_configured_coinbase_provider() {
        let source = ConfiguredRateSource::from_config(&RateSourceConfig::default()).unwrap();
        assert_eq!(source.name(), "coinbase");
    }
}
