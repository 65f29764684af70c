//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`AdminConfig::api_url`]
pub const API_URL_ENV: &str = "CONTENT_ADMIN_API_URL";
/// Environment variable overriding [`AdminConfig::token_file`]
pub const TOKEN_FILE_ENV: &str = "CONTENT_ADMIN_TOKEN_FILE";
/// Environment variable overriding [`AdminConfig::request_timeout_secs`]
pub const TIMEOUT_ENV: &str = "CONTENT_ADMIN_TIMEOUT_SECS";

/// Complete configuration of the dashboard client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base URL of the content backend (e.g. "https://api.example.com")
    pub api_url: String,

    /// File holding the session token
    pub token_file: PathBuf,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Fallback log filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            token_file: PathBuf::from(".content-admin-token"),
            request_timeout_secs: 30,
            log_filter: "content_admin=info".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys take their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (a variable → value function)
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(file) = lookup(TOKEN_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.token_file = PathBuf::from(file.trim());
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", TIMEOUT_ENV, secs))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.api_url.trim().is_empty(), "api_url must not be empty");
        anyhow::ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be positive");
        Ok(())
    }
}
