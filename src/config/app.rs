//! Main application configuration
//!
//! This module defines the configuration structures for a calculator
//! session, including environment variable loading, TOML file loading,
//! and validation.

use crate::error::LedgerError;
use crate::rating::tables::{coefficient_for, default_category, DEFAULT_CLASS};
use crate::types::CompetitionClass;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub session: SessionSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Session-level settings seeding a fresh ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Competition class used for the first record of an empty ledger
    pub default_class: CompetitionClass,
    /// Category used for the first record; must belong to `default_class`
    pub default_category: String,
    /// Optional current-rating text preloaded into the session
    pub current_rating: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            session: SessionSettings::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "paddle-points".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_class: DEFAULT_CLASS,
            default_category: default_category(DEFAULT_CLASS).to_string(),
            current_rating: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("PADDLE_SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("PADDLE_LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(class) = env::var("PADDLE_DEFAULT_CLASS") {
            config.session.default_class = class
                .parse::<CompetitionClass>()
                .context("PADDLE_DEFAULT_CLASS")?;
            // Keep the pair consistent unless the category is also overridden
            config.session.default_category =
                default_category(config.session.default_class).to_string();
        }
        if let Ok(category) = env::var("PADDLE_DEFAULT_CATEGORY") {
            config.session.default_category = category;
        }
        if let Ok(rating) = env::var("PADDLE_CURRENT_RATING") {
            config.session.current_rating = Some(rating);
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate a loaded configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.service.log_level.as_str()) {
        return Err(LedgerError::ConfigurationError {
            message: format!("Invalid log level '{}'", config.service.log_level),
        }
        .into());
    }

    if coefficient_for(
        config.session.default_class,
        &config.session.default_category,
    )
    .is_none()
    {
        return Err(LedgerError::UnknownCategory {
            name: format!(
                "{} (class {})",
                config.session.default_category, config.session.default_class
            ),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.session.default_class, CompetitionClass::ClubLeague);
        assert_eq!(config.session.default_category, "Provincial Lower");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_category_must_belong_to_class() {
        let mut config = AppConfig::default();
        config.session.default_class = CompetitionClass::OpenTournament;
        config.session.default_category = "Provincial Lower".to_string();
        assert!(validate_config(&config).is_err());

        config.session.default_category = "Series A".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_text = r#"
            [service]
            log_level = "debug"

            [session]
            default_class = "open-tournament"
            default_category = "Series B & C"
            current_rating = "1500"
        "#;

        let config: AppConfig = toml::from_str(toml_text).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(
            config.session.default_class,
            CompetitionClass::OpenTournament
        );
        assert_eq!(config.session.current_rating.as_deref(), Some("1500"));
        // Unspecified sections fall back to defaults
        assert_eq!(config.service.name, "paddle-points");
    }
}
