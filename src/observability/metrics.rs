//! Metrics collection and exposition.
//!
//! # Metrics
//! - `revenue_rate_fetch_total` (counter): rate table lookups by source, outcome
//! - `revenue_rate_fetch_duration_seconds` (histogram): lookup latency
//! - `revenue_conversions_total` (counter): conversions by currency, outcome
//! - `revenue_splits_total` (counter): split computations
//! - `revenue_ledger_entries_total` (counter): ledger entries by kind
//! - `revenue_wallet_updates_total` (counter): address writes by chain

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::wallet::Chain;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_rate_fetch(source: &str, success: bool, elapsed: Duration) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "revenue_rate_fetch_total",
        "source" => source.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("revenue_rate_fetch_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_conversion(currency: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "revenue_conversions_total",
        "currency" => currency.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_split() {
    counter!("revenue_splits_total").increment(1);
}

pub fn record_ledger_entry(kind: &str) {
    counter!("revenue_ledger_entries_total", "kind" => kind.to_string()).increment(1);
}

pub fn record_wallet_update(chain: Chain) {
    counter!("revenue_wallet_updates_total", "chain" => chain.name()).increment(1);
}
