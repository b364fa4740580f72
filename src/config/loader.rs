use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::gate::{AttemptPolicy, TERMINATOR};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/keygate/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("keygate").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The secret is non-empty and contains no line terminator
    /// - The secret fits within the line length cap
    /// - The exact attempt policy has at least one attempt
    /// - The poll interval is between 1 and 1000 ms
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gate = &self.gate;

        if gate.secret.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "gate.secret must not be empty".to_string(),
            });
        }

        if gate.secret.as_bytes().contains(&TERMINATOR) {
            return Err(ConfigError::ValidationError {
                message: "gate.secret must not contain a newline".to_string(),
            });
        }

        if let Some(cap) = gate.line_cap() {
            if gate.secret.len() > cap {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "gate.secret is {} bytes, longer than gate.max_line_len ({})",
                        gate.secret.len(),
                        cap
                    ),
                });
            }
        }

        if gate.attempt_policy == AttemptPolicy::Exact && gate.attempts == 0 {
            return Err(ConfigError::ValidationError {
                message: "gate.attempts must be at least 1 with the exact attempt policy"
                    .to_string(),
            });
        }

        if !(1..=1000).contains(&gate.poll_interval_ms) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "gate.poll_interval_ms must be between 1 and 1000, got {}",
                    gate.poll_interval_ms
                ),
            });
        }

        Ok(())
    }
}
