//! Config file storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::backend::DEFAULT_API_URL;
use crate::session::DEFAULT_TEXT;

/// File name generated audio is saved under by default.
pub const DEFAULT_OUTPUT: &str = "chatterbox-output.wav";

/// Errors that can occur while reading or writing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Persistent client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base address.
    pub api_url: String,
    /// Text a new session starts with.
    pub default_text: String,
    /// Where generated audio is saved when no path is given.
    pub output: PathBuf,
    /// External player program; the build default is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_text: DEFAULT_TEXT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            player: None,
        }
    }
}

impl ClientConfig {
    /// Apply a command-line (or environment) override of the API URL.
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.api_url = url.to_string();
        }
        self.api_url = normalize_url(&self.api_url)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes, requiring an http(s) scheme.
pub fn normalize_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');

    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidUrl(url.to_string()))?;

    if host.is_empty() {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }

    Ok(trimmed.to_string())
}

/// Reads and writes [`ClientConfig`] as JSON.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store at the default location
    /// (`<config dir>/chatterbox-cli/config.json`).
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chatterbox-cli")
            .join("config.json");

        Self { path }
    }

    /// Create a store for a custom file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let json = std::fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&json)?;
        debug!(path = %self.path.display(), "Loaded config");

        Ok(config)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;

        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
