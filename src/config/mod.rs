//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PIZZERIA_CHAT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pizzeria_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Typing delay: {} ms", config.chat.typing_delay_ms);
//! ```

mod catalog;
mod chat;
mod error;
mod logging;

pub use catalog::{CatalogConfig, CatalogSourceKind};
pub use chat::{ChatConfig, MAX_HISTORY_LIMIT, MAX_TYPING_DELAY_MS};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration serving the embedded sample menu.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Chat widget behaviour (typing delay, history size)
    #[serde(default)]
    pub chat: ChatConfig,

    /// Menu source and cache
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PIZZERIA_CHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PIZZERIA_CHAT__CHAT__TYPING_DELAY_MS=300` -> `chat.typing_delay_ms = 300`
    /// - `PIZZERIA_CHAT__CATALOG__SOURCE=file` -> `catalog.source = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIZZERIA_CHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.chat.validate()?;
        self.catalog.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
