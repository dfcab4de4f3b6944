//! In-memory revenue ledger.
//!
//! Each recorded payment is split 50/50 between the agent and the user and
//! added to running balances. Balances are also reported in a display
//! currency through a fixed multiplier.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::observability::metrics;
use crate::revenue::split::halve;
use crate::revenue::Result;

/// A single recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    /// Unix timestamp (seconds) when the entry was recorded.
    pub timestamp: u64,
    /// Amount in the ledger's base currency.
    pub amount: f64,
    /// Where the payment came from.
    pub source: String,
    /// Free-form payment category.
    pub kind: String,
    pub agent_share: f64,
    pub user_share: f64,
}

/// Running totals in the base and display currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub base_currency: String,
    pub display_currency: String,
    pub total_earned: f64,
    pub agent_balance: f64,
    pub user_balance: f64,
    pub total_earned_display: f64,
    pub agent_balance_display: f64,
    pub user_balance_display: f64,
}

/// Append-only log of revenue with split balances.
#[derive(Debug, Clone)]
pub struct RevenueLedger {
    config: LedgerConfig,
    entries: Vec<LedgerEntry>,
    total_earned: f64,
    agent_balance: f64,
    user_balance: f64,
}

impl RevenueLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            total_earned: 0.0,
            agent_balance: 0.0,
            user_balance: 0.0,
        }
    }

    /// Record an incoming payment and credit both shares.
    ///
    /// Invalid amounts leave the ledger untouched.
    pub fn record(&mut self, amount: f64, source: &str, kind: &str) -> Result<LedgerEntry> {
        let share = halve(amount)?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            timestamp,
            amount,
            source: source.to_string(),
            kind: kind.to_string(),
            agent_share: share,
            user_share: share,
        };

        self.total_earned += amount;
        self.agent_balance += share;
        self.user_balance += share;
        self.entries.push(entry.clone());

        metrics::record_ledger_entry(kind);
        tracing::info!(
            id = %entry.id,
            amount,
            source,
            kind,
            currency = %self.config.base_currency,
            "Revenue recorded"
        );
        Ok(entry)
    }

    /// Current balances.
    pub fn balances(&self) -> BalanceSummary {
        let rate = self.config.display_rate;
        BalanceSummary {
            base_currency: self.config.base_currency.clone(),
            display_currency: self.config.display_currency.clone(),
            total_earned: self.total_earned,
            agent_balance: self.agent_balance,
            user_balance: self.user_balance,
            total_earned_display: self.total_earned * rate,
            agent_balance_display: self.agent_balance * rate,
            user_balance_display: self.user_balance * rate,
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[LedgerEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
