//! Paddle Points - Rating calculator for table-tennis federation rankings
//!
//! This crate computes rating-point adjustments for a sequence of match
//! results under a federation's numeric ranking rule, and tracks the
//! lifecycle of each result record as a user enters it incrementally.

pub mod config;
pub mod error;
pub mod ledger;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use ledger::MatchLedger;
pub use rating::calculator::compute_delta;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
