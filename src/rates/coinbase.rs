//! Coinbase-style HTTP exchange-rate source.
//!
//! # Responsibilities
//! - GET `{endpoint}?currency=<base>` with a deadline
//! - Validate the `{ data: { rates: { CODE: value } } }` body shape
//! - Map transport, status and shape failures to distinct errors

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::config::RateSourceConfig;
use crate::rates::source::RateSource;
use crate::rates::types::{normalize_code, ExchangeRateTable, RateError, RateResult};

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    data: RatesData,
}

#[derive(Debug, Deserialize)]
struct RatesData {
    currency: Option<String>,
    rates: HashMap<String, RawRate>,
}

/// Coinbase quotes rates as decimal strings; plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRate {
    Number(f64),
    Text(String),
}

/// HTTP rate source.
#[derive(Clone)]
pub struct CoinbaseRateSource {
    client: reqwest::Client,
    endpoint: Url,
    timeout_duration: Duration,
}

impl CoinbaseRateSource {
    /// Create a source from configuration. No request is made here.
    pub fn new(config: &RateSourceConfig) -> RateResult<Self> {
        let endpoint: Url = config.endpoint.parse().map_err(|e| {
            RateError::InvalidEndpoint(format!("'{}': {}", config.endpoint, e))
        })?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("revenue-split/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RateError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    async fn request(&self, base_currency: &str) -> RateResult<String> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("currency", base_currency)])
            .send()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| RateError::Network(e.to_string()))
    }
}

impl RateSource for CoinbaseRateSource {
    fn name(&self) -> &str {
        "coinbase"
    }

    async fn fetch_rates(&self, base_currency: &str) -> RateResult<ExchangeRateTable> {
        let base = normalize_code(base_currency);
        let body = match timeout(self.timeout_duration, self.request(&base)).await {
            Ok(result) => result?,
            Err(_) => return Err(RateError::Timeout(self.timeout_duration.as_secs())),
        };
        parse_rates_body(&base, &body)
    }
}

impl std::fmt::Debug for CoinbaseRateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRateSource")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Parse an exchange-rate response body for `base`.
pub fn parse_rates_body(base: &str, body: &str) -> RateResult<ExchangeRateTable> {
    let envelope: RatesEnvelope = serde_json::from_str(body)
        .map_err(|e| RateError::Parse(e.to_string()))?;

    if let Some(currency) = &envelope.data.currency {
        if !currency.eq_ignore_ascii_case(base) {
            return Err(RateError::Parse(format!(
                "requested rates for {base}, received {currency}"
            )));
        }
    }

    let mut table = ExchangeRateTable::new(base);
    for (code, raw) in envelope.data.rates {
        let value = match raw {
            RawRate::Number(n) => n,
            RawRate::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                RateError::Parse(format!("rate for {code} is not numeric: {text:?}"))
            })?,
        };
        table.insert(&code, value);
    }

    tracing::debug!(base = %table.base(), rates = table.len(), "Parsed exchange-rate table");
    Ok(table)
}
