//! Match ledger: record lifecycle and rating accumulation
//!
//! This module owns the ordered collection of match records, the active-edit
//! pointer, and the derived summary produced by folding the point-delta
//! calculator over the completed records in order.

pub mod store;
pub mod summary;

// Re-export commonly used types
pub use store::{FieldEdit, LedgerStats, MatchLedger};
pub use summary::compute_summary;
