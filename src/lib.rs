//! Revenue splitting and crypto conversion library.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod rates;
pub mod resilience;
pub mod revenue;
pub mod wallet;

pub use config::AppConfig;
pub use lifecycle::Application;
pub use rates::{RateError, RateSource, RevenueConverter};
pub use revenue::{split_revenue, SplitResult};
pub use wallet::{Chain, WalletRegistry};
