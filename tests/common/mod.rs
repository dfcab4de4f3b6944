//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use revenue_split::config::RateSourceConfig;

/// Start a programmable mock rate endpoint on an ephemeral port.
///
/// `f` receives the request line (e.g. `GET /path?query HTTP/1.1`) of each
/// connection and produces the `(status, body)` to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let request_line = head.lines().next().unwrap_or_default().to_string();

                        let (status, body) = f(request_line).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock endpoint that always returns `body` with status 200.
pub async fn start_rates_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move |_request| async move { (200, body.to_string()) }).await
}

/// Rate-source configuration pointing at a mock endpoint.
pub fn rates_config(addr: SocketAddr) -> RateSourceConfig {
    RateSourceConfig {
        endpoint: format!("http://{addr}/v2/exchange-rates"),
        timeout_secs: 2,
        ..RateSourceConfig::default()
    }
}

/// Coinbase-shaped body with SOL and ETH rates for CAD.
pub const CAD_RATES: &str =
    r#"{"data":{"currency":"CAD","rates":{"SOL":"50.0","ETH":"2000","USD":"0.73"}}}"#;
