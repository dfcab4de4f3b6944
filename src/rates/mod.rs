//! Exchange-rate subsystem.
//!
//! # Data Flow
//! ```text
//! RevenueConverter::convert(amount, "SOL")
//!     → converter.rs (validate input, retry policy, metrics)
//!     → source.rs (RateSource trait: coinbase | static)
//!     → coinbase.rs (HTTP GET, deadline, body validation)
//!     → types.rs (ExchangeRateTable lookup → amount / rate)
//! ```

pub mod coinbase;
pub mod converter;
pub mod source;
pub mod types;

pub use coinbase::CoinbaseRateSource;
pub use converter::RevenueConverter;
pub use source::{ConfiguredRateSource, RateSource, StaticRateSource};
pub use types::{Conversion, ExchangeRateTable, RateError, RateResult};
