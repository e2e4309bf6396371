//! Configuration file management.
//!
//! Handles reading, writing, and validating `.blt.toml` configuration files.
//! The file is optional: a repository without one runs on defaults and
//! prompts for whatever it needs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.blt.toml`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Acquia Cloud settings
    #[serde(default)]
    pub cloud: CloudConfig,
}

/// The `[cloud]` section.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Acquia Cloud application UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Prompt-and-authenticate cycles before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_attempts: Option<u32>,
    /// API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// OAuth token endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
}

impl Config {
    /// Path to the configuration file under a repository root
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists under a repository root
    pub fn exists(root: &Path) -> bool {
        Self::config_path(root).exists()
    }

    /// Load configuration from `<root>/.blt.toml`, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed and
    /// `ConfigError::InvalidValue` if a setting is out of range.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;

        config.validate()?;

        debug!(app_id = ?config.cloud.app_id, "config loaded");
        Ok(config)
    }

    /// Save configuration to `<root>/.blt.toml`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, root: &Path) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::config_path(root), contents)?;

        Ok(())
    }

    /// Validate setting ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.cloud.auth_attempts == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cloud.auth_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if let Some(id) = &self.cloud.app_id {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "cloud.app_id",
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Number of prompt-and-authenticate cycles allowed.
    pub fn auth_attempts(&self) -> u32 {
        self.cloud
            .auth_attempts
            .unwrap_or(constants::DEFAULT_AUTH_ATTEMPTS)
    }

    /// API base URL: environment, then config, then the public endpoint.
    pub fn api_url(&self) -> String {
        resolve_url(
            constants::API_URL_ENV,
            self.cloud.api_url.as_deref(),
            constants::DEFAULT_API_URL,
        )
    }

    /// OAuth token URL: environment, then config, then the public endpoint.
    pub fn token_url(&self) -> String {
        resolve_url(
            constants::TOKEN_URL_ENV,
            self.cloud.token_url.as_deref(),
            constants::DEFAULT_TOKEN_URL,
        )
    }
}

fn resolve_url(var: &str, configured: Option<&str>, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
