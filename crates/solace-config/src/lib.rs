//! Configuration parsing and validation for solace
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Remote service endpoint and timeout
//! - Local data directory
//! - Validation with clear error messages

mod schema;
mod settings;

pub use schema::*;
pub use settings::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

fn validate_config(raw: &RawConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !raw.service.api_base_url.starts_with("http://")
        && !raw.service.api_base_url.starts_with("https://")
    {
        errors.push(format!(
            "service.api_base_url must be an http(s) URL, got '{}'",
            raw.service.api_base_url
        ));
    }

    if raw.service.request_timeout_seconds == Some(0) {
        errors.push("service.request_timeout_seconds must be greater than zero".into());
    }

    if raw.user.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
        errors.push("user.id must not be blank".into());
    }

    errors
}
