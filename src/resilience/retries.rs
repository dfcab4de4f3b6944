//! Retry logic.
//!
//! # Responsibilities
//! - Execute an async operation up to `max_attempts` times
//! - Sleep with exponential backoff + jitter between attempts
//! - Stop immediately on errors the caller marks as permanent

use std::fmt::Display;
use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Number of attempts a policy allows, never less than one.
pub fn attempt_budget(config: &RetryConfig) -> u32 {
    if config.enabled {
        config.max_attempts.max(1)
    } else {
        1
    }
}

/// Run `op` until it succeeds, fails permanently, or the budget is spent.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    config: &RetryConfig,
    operation: &str,
    is_retryable: R,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let budget = attempt_budget(config);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < budget && is_retryable(&e) => {
                let delay = calculate_backoff(attempt, config.base_delay_ms, config.max_delay_ms);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = budget,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
