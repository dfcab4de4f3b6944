//! End-to-end tests of the HTTP rate source against a mock endpoint.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use revenue_split::config::RetryConfig;
use revenue_split::rates::{CoinbaseRateSource, RateError, RateSource, RevenueConverter};

mod common;

#[tokio::test]
async fn test_fetches_and_converts() {
    let addr = common::start_rates_backend(common::CAD_RATES).await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let converter = RevenueConverter::new(source, "CAD");

    assert_eq!(converter.convert(1000.0, "SOL").await.unwrap(), 20.0);
    assert_eq!(converter.convert(1000.0, "ETH").await.unwrap(), 0.5);
}

#[tokio::test]
async fn test_request_carries_normalized_base_currency() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let addr = common::start_programmable_backend(move |request| {
        seen.lock().unwrap().push(request);
        async { (200, common::CAD_RATES.to_string()) }
    })
    .await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();

    let table = source.fetch_rates("cad").await.unwrap();
    assert_eq!(table.base(), "CAD");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].starts_with("GET /v2/exchange-rates?currency=CAD "),
        "unexpected request line: {}",
        requests[0]
    );
}

#[tokio::test]
async fn test_missing_currency_is_rate_unavailable() {
    let addr = common::start_rates_backend(common::CAD_RATES).await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let converter = RevenueConverter::new(source, "CAD");

    let err = converter.convert(1000.0, "DOGE").await.unwrap_err();
    assert!(matches!(err, RateError::RateUnavailable { ref currency } if currency == "DOGE"));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let addr = common::start_rates_backend(r#"{"data":{"rates":"unavailable"}}"#).await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();

    let err = source.fetch_rates("CAD").await.unwrap_err();
    assert!(matches!(err, RateError::Parse(_)));

    let addr = common::start_rates_backend("<html>maintenance</html>").await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let err = source.fetch_rates("CAD").await.unwrap_err();
    assert!(matches!(err, RateError::Parse(_)));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let addr = common::start_programmable_backend(|_request| async {
        (404, r#"{"errors":[{"id":"not_found"}]}"#.to_string())
    })
    .await;
    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();

    let err = source.fetch_rates("CAD").await.unwrap_err();
    assert!(matches!(err, RateError::Status(404)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let err = source.fetch_rates("CAD").await.unwrap_err();
    assert!(matches!(err, RateError::Network(_)));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let addr = common::start_programmable_backend(|_request| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, common::CAD_RATES.to_string())
    })
    .await;
    let mut config = common::rates_config(addr);
    config.timeout_secs = 1;
    let source = CoinbaseRateSource::new(&config).unwrap();

    let err = source.fetch_rates("CAD").await.unwrap_err();
    assert!(matches!(err, RateError::Timeout(1)));
}

#[tokio::test]
async fn test_retry_recovers_from_server_errors() {
    let call_count = Arc::new(AtomicU32::new(0));
    let cc = call_count.clone();
    let addr = common::start_programmable_backend(move |_request| {
        let cc = cc.clone();
        async move {
            let count = cc.fetch_add(1, Ordering::SeqCst);
            if count < 2 {
                (503, "Service Unavailable".into())
            } else {
                (200, common::CAD_RATES.to_string())
            }
        }
    })
    .await;

    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let converter = RevenueConverter::new(source, "CAD").with_retries(RetryConfig {
        enabled: true,
        max_attempts: 3,
        base_delay_ms: 10,
        max_delay_ms: 50,
    });

    assert_eq!(converter.convert(1000.0, "SOL").await.unwrap(), 20.0);
    assert_eq!(call_count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_without_retries_first_failure_is_final() {
    let call_count = Arc::new(AtomicU32::new(0));
    let cc = call_count.clone();
    let addr = common::start_programmable_backend(move |_request| {
        let cc = cc.clone();
        async move {
            cc.fetch_add(1, Ordering::SeqCst);
            (500, "boom".to_string())
        }
    })
    .await;

    let source = CoinbaseRateSource::new(&common::rates_config(addr)).unwrap();
    let converter = RevenueConverter::new(source, "CAD");

    let err = converter.convert(1000.0, "SOL").await.unwrap_err();
    assert!(matches!(err, RateError::Status(500)));
    assert_eq!(call_count.load(Ordering::SeqCst), 1);
}
