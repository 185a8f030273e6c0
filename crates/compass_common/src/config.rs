//! Compass configuration.
//!
//! Config file: ~/.config/compass/config.toml. Every field has a default
//! so a missing or partial file still yields a working setup. The API key
//! never lives in the file; it comes from the environment at run time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable carrying the model API key.
pub const API_KEY_ENV: &str = "COMPASS_API_KEY";

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

/// Model endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name interpolated into the endpoint path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint base URL (no trailing slash).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Attempts per submission before the failure is surfaced.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            attempts: default_attempts(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Main compass configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompassConfig {
    #[serde(default)]
    pub model: ModelConfig,
}

impl CompassConfig {
    /// Config file location: $XDG_CONFIG_HOME/compass/config.toml.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("compass").join("config.toml"))
    }

    /// Load the config file.
    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("No config directory available")?;
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when absent or broken.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// API key from the environment. Empty values count as absent.
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompassConfig::default();
        assert_eq!(config.model.attempts, 3);
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert!(config.model.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CompassConfig = toml::from_str(
            r#"
            [model]
            model = "gemini-2.5-pro"
            "#,
        )
        .unwrap();
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.attempts, 3);
        assert_eq!(config.model.request_timeout_secs, 30);
    }

    #[test]
    fn test_empty_toml_is_valid() {
        let config: CompassConfig = toml::from_str("").unwrap();
        assert_eq!(config.model.attempts, 3);
    }

    #[test]
    fn test_config_serializes_back_to_toml() {
        let rendered = toml::to_string_pretty(&CompassConfig::default()).unwrap();
        assert!(rendered.contains("attempts = 3"));
    }
}
