//! Exchange-rate types and error definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while fetching or applying exchange rates.
#[derive(Debug, Error)]
pub enum RateError {
    /// Caller supplied an amount or currency code that cannot be converted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Target currency is absent from the rate table.
    #[error("No exchange rate available for {currency}")]
    RateUnavailable { currency: String },

    /// Target currency is present but its rate is unusable.
    #[error("Exchange rate for {currency} is not positive: {value}")]
    InvalidRate { currency: String, value: f64 },

    /// Rate source does not serve the requested base currency.
    #[error("Rate source serves {available}, not {requested}")]
    UnsupportedBase { requested: String, available: String },

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Lookup exceeded its deadline.
    #[error("Rate lookup timed out after {0} seconds")]
    Timeout(u64),

    /// Rate source answered with a non-success HTTP status.
    #[error("Rate source returned HTTP {0}")]
    Status(u16),

    /// Response body did not have the expected shape.
    #[error("Malformed rate response: {0}")]
    Parse(String),

    /// Rate source endpoint could not be used.
    #[error("Invalid rate endpoint: {0}")]
    InvalidEndpoint(String),
}

impl RateError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RateError::Network(_) | RateError::Timeout(_) => true,
            RateError::Status(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Result type for rate operations.
pub type RateResult<T> = Result<T, RateError>;

/// Normalize a currency code for lookups.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Rates for one base currency, keyed by target code.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateTable {
    base: String,
    rates: HashMap<String, f64>,
    /// Entries whose value was zero, negative or not finite.
    rejected: HashMap<String, f64>,
}

impl ExchangeRateTable {
    /// Create an empty table for `base`.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_code(base),
            ..Self::default()
        }
    }

    /// Build a table from `(code, rate)` pairs.
    pub fn from_pairs<I, S>(base: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new(base);
        for (code, rate) in pairs {
            table.insert(code.as_ref(), rate);
        }
        table
    }

    /// Add a rate. Unusable values are kept aside and never returned by [`rate`](Self::rate).
    pub fn insert(&mut self, code: &str, rate: f64) {
        let code = normalize_code(code);
        if rate.is_finite() && rate > 0.0 {
            self.rejected.remove(&code);
            self.rates.insert(code, rate);
        } else {
            tracing::warn!(currency = %code, value = rate, "Rejecting unusable exchange rate");
            self.rates.remove(&code);
            self.rejected.insert(code, rate);
        }
    }

    /// Look up the rate for `code`.
    pub fn rate(&self, code: &str) -> RateResult<f64> {
        let code = normalize_code(code);
        if let Some(rate) = self.rates.get(&code) {
            return Ok(*rate);
        }
        match self.rejected.get(&code) {
            Some(value) => Err(RateError::InvalidRate {
                currency: code,
                value: *value,
            }),
            None => Err(RateError::RateUnavailable { currency: code }),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of usable rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Outcome of a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount in the source currency.
    pub amount: f64,
    pub source_currency: String,
    pub target_currency: String,
    /// Rate used, as served by the source.
    pub rate: f64,
    /// Amount in the target currency.
    pub converted: f64,
}
