//! Payout wallet addresses.
//!
//! Addresses are opaque strings held in memory only. No keys are ever
//! loaded or stored here.

pub mod registry;
pub mod types;

pub use registry::WalletRegistry;
pub use types::{Chain, ChainAddress, WalletError};
