//! Conversion of source-currency revenue into crypto units.

use futures_util::future::join_all;
use std::time::Instant;

use crate::config::{RateDirection, RetryConfig};
use crate::observability::metrics;
use crate::rates::source::RateSource;
use crate::rates::types::{normalize_code, Conversion, ExchangeRateTable, RateError, RateResult};
use crate::resilience::retry_with_backoff;

/// Converts amounts in a fixed source currency using an injected rate source.
#[derive(Debug)]
pub struct RevenueConverter<S> {
    source: S,
    source_currency: String,
    direction: RateDirection,
    retries: RetryConfig,
}

impl<S: RateSource> RevenueConverter<S> {
    /// Create a converter with a single-attempt policy and the default direction.
    pub fn new(source: S, source_currency: &str) -> Self {
        Self {
            source,
            source_currency: normalize_code(source_currency),
            direction: RateDirection::default(),
            retries: RetryConfig::default(),
        }
    }

    pub fn with_direction(mut self, direction: RateDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_retries(mut self, retries: RetryConfig) -> Self {
        self.retries = retries;
        self
    }

    pub fn source_currency(&self) -> &str {
        &self.source_currency
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the current rate table for the source currency.
    pub async fn fetch_rates(&self) -> RateResult<ExchangeRateTable> {
        let started = Instant::now();
        let result = retry_with_backoff(
            &self.retries,
            "fetch_rates",
            RateError::is_retryable,
            || self.source.fetch_rates(&self.source_currency),
        )
        .await;

        metrics::record_rate_fetch(self.source.name(), result.is_ok(), started.elapsed());
        match &result {
            Ok(table) => tracing::debug!(
                source = self.source.name(),
                base = %self.source_currency,
                rates = table.len(),
                "Exchange rates fetched"
            ),
            Err(e) => tracing::warn!(
                source = self.source.name(),
                base = %self.source_currency,
                error = %e,
                "Exchange rate lookup failed"
            ),
        }
        result
    }

    /// Convert `amount` into `target_currency`, returning the full record.
    pub async fn quote(&self, amount: f64, target_currency: &str) -> RateResult<Conversion> {
        let target = normalize_code(target_currency);
        let result = self.quote_inner(amount, &target).await;
        metrics::record_conversion(&target, result.is_ok());
        if let Ok(conversion) = &result {
            tracing::info!(
                amount = conversion.amount,
                source = %conversion.source_currency,
                target = %conversion.target_currency,
                rate = conversion.rate,
                converted = conversion.converted,
                "Converted revenue"
            );
        }
        result
    }

    /// Convert `amount` into `target_currency`.
    pub async fn convert(&self, amount: f64, target_currency: &str) -> RateResult<f64> {
        self.quote(amount, target_currency)
            .await
            .map(|conversion| conversion.converted)
    }

    /// Run independent conversions concurrently.
    ///
    /// Results are returned in request order, paired with their code.
    pub async fn convert_many<'a>(
        &self,
        amount: f64,
        target_currencies: &[&'a str],
    ) -> Vec<(&'a str, RateResult<Conversion>)> {
        let results = join_all(
            target_currencies
                .iter()
                .map(|code| self.quote(amount, code)),
        )
        .await;
        target_currencies.iter().copied().zip(results).collect()
    }

    async fn quote_inner(&self, amount: f64, target: &str) -> RateResult<Conversion> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(RateError::InvalidInput(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        if target.is_empty() {
            return Err(RateError::InvalidInput(
                "target currency code is empty".to_string(),
            ));
        }

        let table = self.fetch_rates().await?;
        let rate = table.rate(target)?;
        let converted = match self.direction {
            RateDirection::Divide => amount / rate,
            RateDirection::Multiply => amount * rate,
        };

        Ok(Conversion {
            amount,
            source_currency: self.source_currency.clone(),
            target_currency: target.to_string(),
            rate,
            converted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::source::StaticRateSource;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn stub_converter() -> RevenueConverter<StaticRateSource> {
        let source = StaticRateSource::with_rates("CAD", [("SOL", 50.0), ("ETH", 2000.0)]);
        RevenueConverter::new(source, "CAD")
    }

    /// Fails with a network error a fixed number of times, then serves rates.
    struct FlakySource {
        failures: u32,
        calls: AtomicU32,
    }

    impl RateSource for FlakySource {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn fetch_rates(&self, base_currency: &str) -> RateResult<ExchangeRateTable> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(RateError::Network("connection reset".to_string()));
            }
            Ok(ExchangeRateTable::from_pairs(base_currency, [("SOL", 50.0)]))
        }
    }

    #[tokio::test]
    async fn test_convert_divides_by_rate() {
        let converter = stub_converter();
        assert_eq!(converter.convert(1000.0, "SOL").await.unwrap(), 20.0);
        assert_eq!(converter.convert(1000.0, "ETH").await.unwrap(), 0.5);
    }

    #[tokio::test]
    async fn test_missing_currency_is_rate_unavailable() {
        let converter = stub_converter();
        let err = converter.convert(1000.0, "DOGE").await.unwrap_err();
        assert!(matches!(err, RateError::RateUnavailable { ref currency } if currency == "DOGE"));
    }

    #[tokio::test]
    async fn test_zero_amount_converts_to_zero() {
        let converter = stub_converter();
        assert_eq!(converter.convert(0.0, "SOL").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let converter = stub_converter();
        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            let err = converter.convert(amount, "SOL").await.unwrap_err();
            assert!(matches!(err, RateError::InvalidInput(_)));
        }
        let err = converter.convert(10.0, "  ").await.unwrap_err();
        assert!(matches!(err, RateError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_multiply_direction() {
        let converter = stub_converter().with_direction(RateDirection::Multiply);
        assert_eq!(converter.convert(2.0, "SOL").await.unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_quote_record() {
        let converter = stub_converter();
        let conversion = converter.quote(1000.0, "sol").await.unwrap();
        assert_eq!(
            conversion,
            Conversion {
                amount: 1000.0,
                source_currency: "CAD".to_string(),
                target_currency: "SOL".to_string(),
                rate: 50.0,
                converted: 20.0,
            }
        );
    }

    #[tokio::test]
    async fn test_convert_many_keeps_request_order() {
        let converter = stub_converter();
        let results = converter.convert_many(1000.0, &["ETH", "DOGE", "SOL"]).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "ETH");
        assert_eq!(results[0].1.as_ref().unwrap().converted, 0.5);
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().converted, 20.0);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let source = FlakySource { failures: 1, calls: AtomicU32::new(0) };
        let converter = RevenueConverter::new(source, "CAD");

        let err = converter.convert(100.0, "SOL").await.unwrap_err();
        assert!(matches!(err, RateError::Network(_)));
        assert_eq!(converter.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_failures_when_enabled() {
        let source = FlakySource { failures: 2, calls: AtomicU32::new(0) };
        let converter = RevenueConverter::new(source, "CAD").with_retries(RetryConfig {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
        });

        assert_eq!(converter.convert(100.0, "SOL").await.unwrap(), 2.0);
        assert_eq!(converter.source().calls.load(Ordering::SeqCst), 3);
    }
}
