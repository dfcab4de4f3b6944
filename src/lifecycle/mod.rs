//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → WalletRegistry → rate source → RevenueConverter → RevenueLedger
//!
//! Shutdown (shutdown.rs):
//!     Consume Application → log final wallets and balances → ShutdownReport
//! ```
//!
//! # Design Decisions
//! - Nothing is initialized implicitly; callers bootstrap explicitly
//! - Ordered startup: config first, then components
//! - Startup fails fast on invalid configuration

pub mod shutdown;
pub mod startup;

pub use shutdown::ShutdownReport;
pub use startup::{AppError, Application, ExampleReport, WalletLookup, WalletPayout};
