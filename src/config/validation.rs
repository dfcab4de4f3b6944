//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, rates positive)
//! - Check the endpoint and metrics address are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{AppConfig, RateProvider};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, address) in [
        ("wallets.solana", &config.wallets.solana),
        ("wallets.ethereum", &config.wallets.ethereum),
    ] {
        if matches!(address, Some(a) if a.trim().is_empty()) {
            errors.push(ValidationError::new(field, "address must not be blank"));
        }
    }

    let rates = &config.rates;
    match url::Url::parse(&rates.endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "rates.endpoint",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "rates.endpoint",
            format!("invalid URL '{}': {}", rates.endpoint, e),
        )),
    }
    check_currency_code("rates.source_currency", &rates.source_currency, &mut errors);
    if rates.timeout_secs == 0 {
        errors.push(ValidationError::new("rates.timeout_secs", "must be greater than 0"));
    }
    if rates.provider == RateProvider::Static && rates.static_rates.is_empty() {
        errors.push(ValidationError::new(
            "rates.static_rates",
            "static provider requires at least one rate",
        ));
    }
    for (code, rate) in &rates.static_rates {
        let field = format!("rates.static_rates.{code}");
        check_currency_code(&field, code, &mut errors);
        if !rate.is_finite() || *rate <= 0.0 {
            errors.push(ValidationError::new(field, format!("rate {rate} must be positive")));
        }
    }

    let retries = &config.retries;
    if retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if retries.base_delay_ms > retries.max_delay_ms {
        errors.push(ValidationError::new(
            "retries.base_delay_ms",
            format!(
                "base delay {}ms exceeds max delay {}ms",
                retries.base_delay_ms, retries.max_delay_ms
            ),
        ));
    }

    let ledger = &config.ledger;
    check_currency_code("ledger.base_currency", &ledger.base_currency, &mut errors);
    check_currency_code("ledger.display_currency", &ledger.display_currency, &mut errors);
    if !ledger.display_rate.is_finite() || ledger.display_rate <= 0.0 {
        errors.push(ValidationError::new(
            "ledger.display_rate",
            format!("rate {} must be positive", ledger.display_rate),
        ));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_currency_code(field: &str, code: &str, errors: &mut Vec<ValidationError>) {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::new(
            field,
            format!("invalid currency code '{code}'"),
        ));
    }
}
