//! Configuration management for the points calculator
//!
//! This module handles configuration loading from environment variables or a
//! TOML file, validation, and default values for a calculator session.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, SessionSettings};
