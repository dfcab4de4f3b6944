//! Shutdown of the application.

use serde::Serialize;

use crate::lifecycle::startup::Application;
use crate::revenue::BalanceSummary;
use crate::wallet::ChainAddress;

/// Final state reported when the application is torn down.
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownReport {
    pub wallets: Vec<ChainAddress>,
    pub ledger_entries: usize,
    pub balances: BalanceSummary,
}

impl Application {
    /// Consume the application and report its final state.
    pub fn shutdown(self) -> ShutdownReport {
        let report = ShutdownReport {
            wallets: self.registry.addresses(),
            ledger_entries: self.ledger.len(),
            balances: self.ledger.balances(),
        };

        tracing::info!(
            wallets = report.wallets.len(),
            ledger_entries = report.ledger_entries,
            total_earned = report.balances.total_earned,
            "Shutdown complete"
        );
        report
    }
}
