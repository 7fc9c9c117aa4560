//! Configuration management for Herald.

use std::fs;
use std::path::Path;
use std::time::Duration;

use herald_github::{ClientOptions, GitHubClient};
use serde::Deserialize;

use crate::error::Result;

/// File name looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = ".herald.toml";

/// Environment variable overriding the API URL (exported by GitHub Actions).
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Herald configuration loaded from `.herald.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub connection settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Commit status defaults.
    #[serde(default)]
    pub status: StatusConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.github.api_url = Some(url.trim().to_string());
        }
    }
}

/// GitHub connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Custom API URL for GitHub Enterprise.
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GitHubConfig {
    /// The API root to talk to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or(GitHubClient::DEFAULT_API_URL)
    }

    /// Transport options for the HTTP client.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("herald/{}", env!("CARGO_PKG_VERSION"))
}

/// Commit status defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Context used when none is given on the command line.
    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
        }
    }
}

fn default_context() -> String {
    "herald".into()
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Level for herald's own events (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".into()
}
