//! In-memory registry of payout addresses.

use dashmap::DashMap;
use std::sync::Arc;

use crate::config::WalletConfig;
use crate::observability::metrics;
use crate::wallet::types::{Chain, ChainAddress};

/// Holds zero or one address per supported chain.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct WalletRegistry {
    addresses: Arc<DashMap<Chain, String>>,
}

impl WalletRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry from configured addresses.
    pub fn from_config(config: &WalletConfig) -> Self {
        let registry = Self::new();
        if let Some(address) = &config.solana {
            registry.set_address(Chain::Solana, address.clone());
        }
        if let Some(address) = &config.ethereum {
            registry.set_address(Chain::Ethereum, address.clone());
        }
        registry
    }

    /// Store `address` for `chain`, returning the address it replaced.
    pub fn set_address(&self, chain: Chain, address: impl Into<String>) -> Option<String> {
        let address = address.into();
        tracing::info!(chain = %chain, address = %address, "Wallet initialized");
        metrics::record_wallet_update(chain);
        self.addresses.insert(chain, address)
    }

    /// Currently stored address for `chain`, if any.
    pub fn get_address(&self, chain: Chain) -> Option<String> {
        self.addresses.get(&chain).map(|r| r.value().clone())
    }

    /// Remove the address for `chain`, returning it.
    pub fn clear(&self, chain: Chain) -> Option<String> {
        self.addresses.remove(&chain).map(|(_, address)| address)
    }

    /// All stored addresses in chain order.
    pub fn addresses(&self) -> Vec<ChainAddress> {
        Chain::ALL
            .into_iter()
            .filter_map(|chain| {
                self.get_address(chain)
                    .map(|address| ChainAddress { chain, address })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
