//! Configuration management for duewatch
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (DUEWATCH_*, plus ORG_NAME)
//! 3. Config file (~/.config/duewatch/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Organization whose projects are checked
    pub organization: Option<String>,

    /// GraphQL endpoint
    pub graphql_url: String,

    /// Timeout applied to every HTTP request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Abort a fetch when the remaining GraphQL quota drops below this
    pub min_rate_remaining: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            organization: None,
            graphql_url: "https://api.github.com/graphql".to_string(),
            timeout: Duration::from_secs(30),
            min_rate_remaining: 1,
        }
    }
}

/// Slack delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackConfig {
    /// chat.postMessage endpoint
    pub post_message_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            post_message_url: "https://slack.com/api/chat.postMessage".to_string(),
        }
    }
}

/// User directory mapping GitHub logins to Slack ids
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// URL returning `{"users": [{"githubName", "slackUserId"}]}`
    pub url: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub settings
    pub github: GitHubConfig,

    /// Slack settings
    pub slack: SlackConfig,

    /// User directory settings
    pub directory: DirectoryConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/duewatch/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("duewatch").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - DUEWATCH_ORG (or ORG_NAME): organization login
    /// - DUEWATCH_TIMEOUT_SECS: HTTP timeout in seconds
    /// - DUEWATCH_DIRECTORY_URL: user directory endpoint
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(org) = var("DUEWATCH_ORG").or_else(|| var("ORG_NAME")) {
            if !org.trim().is_empty() {
                self.github.organization = Some(org.trim().to_string());
            }
        }

        if let Some(secs) = var("DUEWATCH_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.github.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %secs, "Ignoring invalid DUEWATCH_TIMEOUT_SECS"),
            }
        }

        if let Some(url) = var("DUEWATCH_DIRECTORY_URL") {
            self.directory.url = Some(url);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, organization: Option<String>, timeout: Option<Duration>) -> Self {
        if let Some(org) = organization {
            self.github.organization = Some(org);
        }

        if let Some(t) = timeout {
            self.github.timeout = t;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        organization: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(organization, timeout))
    }

    /// The configured organization, or a configuration error when unset
    pub fn organization(&self) -> Result<&str> {
        self.github.organization.as_deref().ok_or_else(|| {
            Error::Config(
                "No organization configured. Pass --org, set ORG_NAME, \
                 or add github.organization to the config file"
                    .to_string(),
            )
        })
    }
}
