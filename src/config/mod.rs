//! # Configuration Management Module
//!
//! Centralized configuration for the questlog CLI with validation-by-type,
//! defaults, and persistence.
//!
//! ## Configuration Structure
//!
//! - [`StorageConfig`] - where the sled database lives
//! - [`NarratorConfig`] - LLM narration settings (Groq chat completions)
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questlog::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("questlog.toml").await?;
//!     println!("Data dir: {}", config.storage.data_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//!
//! [narrator]
//! enabled = true
//! api_key = ""
//! model = "llama-3.3-70b-versatile"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! The narrator API key may also come from the `GROQ_API_KEY` environment
//! variable, which takes precedence over the file. With no key configured the
//! narrator stays inert and every operation serves its deterministic
//! fallback.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub narrator: NarratorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the sled database. Created on first open.
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Enable/disable LLM narration. Disabled or keyless narrators serve
    /// deterministic fallbacks.
    pub enabled: bool,
    /// Groq API key. Overridden by `GROQ_API_KEY` when set.
    pub api_key: String,
    /// Chat model identifier
    pub model: String,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Load configuration from a file, then apply environment overrides.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                self.narrator.api_key = key;
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                data_dir: "./data".to_string(),
            },
            narrator: NarratorConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("questlog.log".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrator_defaults_are_inert_without_key() {
        let config = NarratorConfig::default();
        assert!(config.enabled);
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.storage.data_dir, config.storage.data_dir);
        assert_eq!(parsed.narrator.model, config.narrator.model);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn narrator_section_is_optional() {
        let minimal = r#"
            [storage]
            data_dir = "./elsewhere"

            [logging]
            level = "debug"
        "#;

        let config: Config = toml::from_str(minimal).unwrap();
        assert_eq!(config.storage.data_dir, "./elsewhere");
        assert!(config.narrator.api_key.is_empty());
    }
}
