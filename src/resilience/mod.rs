//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Rate lookup:
//!     → tokio::time::timeout (deadline per attempt, in the rate source)
//!     → On failure: retries.rs (check if retryable, retry with backoff)
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline
//! - Retries are off by default; one attempt per lookup
//! - Only transport failures are retryable, never malformed responses

pub mod backoff;
pub mod retries;

pub use retries::retry_with_backoff;
