//! Error types for the points calculator
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the application. The ledger operations and the delta
//! calculator are infallible; errors only surface from configuration loading
//! and the CLI shell.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific calculator scenarios
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Unknown competition category: {name}")]
    UnknownCategory { name: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },
}
