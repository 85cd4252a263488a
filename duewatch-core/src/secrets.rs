//! Secrets management for duewatch
//!
//! Tokens live in `~/.config/duewatch/secrets.toml`, separate from the
//! configuration, and the file must have restrictive permissions (0600 on
//! Unix).
//!
//! Loading priority for each token:
//! 1. Environment variable (GITHUB_TOKEN, SLACK_BOT_TOKEN, AUTH_TOKEN)
//! 2. Secrets file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub credentials
    pub github: TokenSecret,

    /// Slack bot credentials
    pub slack: TokenSecret,

    /// User directory credentials
    pub directory: TokenSecret,
}

/// A single bearer-style token
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenSecret {
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        for secret in [&mut secrets.github, &mut secrets.slack, &mut secrets.directory] {
            if let Some(ref mut token) = secret.token {
                *token = token.trim().to_string();
            }
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/duewatch/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("duewatch").join("secrets.toml"))
    }

    /// GitHub token, GITHUB_TOKEN env var first
    pub fn github_token(&self) -> Option<String> {
        resolve("GITHUB_TOKEN", &self.github)
    }

    /// Slack bot token, SLACK_BOT_TOKEN env var first
    pub fn slack_bot_token(&self) -> Option<String> {
        resolve("SLACK_BOT_TOKEN", &self.slack)
    }

    /// User directory token, AUTH_TOKEN env var first
    pub fn directory_token(&self) -> Option<String> {
        resolve("AUTH_TOKEN", &self.directory)
    }

    /// GitHub token or a `MissingSecret` error naming how to provide it
    pub fn require_github_token(&self) -> Result<String> {
        self.github_token().ok_or_else(|| {
            Error::MissingSecret(
                "GitHub token not found. Set GITHUB_TOKEN or add [github] token \
                 to ~/.config/duewatch/secrets.toml"
                    .to_string(),
            )
        })
    }

    /// Slack bot token or a `MissingSecret` error
    pub fn require_slack_bot_token(&self) -> Result<String> {
        self.slack_bot_token().ok_or_else(|| {
            Error::MissingSecret(
                "Slack bot token not found. Set SLACK_BOT_TOKEN or add [slack] token \
                 to ~/.config/duewatch/secrets.toml"
                    .to_string(),
            )
        })
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# duewatch secrets
# This file contains credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[github]
# Needs: read:project, project (write) for labels/items, repo for repository creation
token = ""

[slack]
# Bot token (xoxb-...) with chat:write
token = ""

[directory]
# Sent verbatim as the Authorization header to the user directory
token = ""
"#;

        std::fs::write(&path, template).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your tokens");

        Ok(path)
    }
}

fn resolve(env_var: &str, secret: &TokenSecret) -> Option<String> {
    if let Ok(token) = std::env::var(env_var) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            debug!(env_var, "Using token from environment variable");
            return Some(token);
        }
    }

    secret
        .token
        .as_ref()
        .filter(|t| !t.is_empty())
        .cloned()
}
