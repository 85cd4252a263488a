//! GitHub login to Slack user id directory

use crate::{NotifyError, Result};
use duewatch_core::DirectoryConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// One directory entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub github_name: String,
    pub slack_user_id: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    users: Vec<DirectoryUser>,
}

/// Users known to the directory, keyed by GitHub login
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    by_login: HashMap<String, String>,
}

impl UserDirectory {
    /// Fetch from the configured endpoint
    pub async fn from_config(
        config: &DirectoryConfig,
        auth_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| NotifyError::Config("directory.url is not set".to_string()))?;
        Self::fetch(url, auth_token, timeout).await
    }

    /// GET the user list from `url`
    ///
    /// `auth_token` is sent verbatim as the `Authorization` header.
    pub async fn fetch(url: &str, auth_token: Option<&str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        let mut request = http.get(url);
        if let Some(token) = auth_token {
            request = request.header("Authorization", token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NotifyError::Status {
                service: "user directory",
                status: status.as_u16(),
                body,
            });
        }

        let directory = Self::from_json(&body)?;
        debug!(users = directory.len(), "Fetched user directory");
        Ok(directory)
    }

    /// Parse a `{"users": [...]}` document
    pub fn from_json(body: &str) -> Result<Self> {
        let response: DirectoryResponse = serde_json::from_str(body)
            .map_err(|e| NotifyError::Parse(format!("Failed to parse user directory: {}", e)))?;
        Ok(Self::from_users(response.users))
    }

    /// Build from entries; the first entry for a login wins
    pub fn from_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        let mut by_login = HashMap::new();
        for user in users {
            by_login.entry(user.github_name).or_insert(user.slack_user_id);
        }
        Self { by_login }
    }

    /// Slack user id for a GitHub login
    pub fn slack_id_for(&self, login: &str) -> Option<&str> {
        self.by_login.get(login).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_login.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_login.is_empty()
    }
}
