//! GitHub API client: GraphQL over reqwest, REST via octocrab

use crate::graphql::GraphQLTransport;
use crate::{Error, Result};
use async_trait::async_trait;
use duewatch_core::{Config, GitHubConfig, Secrets};
use octocrab::Octocrab;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Authenticated GitHub client
///
/// Built once from the loaded configuration and token, then passed by
/// reference to everything that talks to GitHub.
pub struct GitHubClient {
    http: reqwest::Client,
    octocrab: Octocrab,
    graphql_url: String,
    timeout: Duration,
    token: String,
}

impl GitHubClient {
    /// Create a client from configuration and a personal access token
    pub fn new(config: &GitHubConfig, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("duewatch")
            .build()?;

        let octocrab = Octocrab::builder()
            .personal_token(token.clone())
            .set_connect_timeout(Some(config.timeout))
            .set_read_timeout(Some(config.timeout))
            .set_write_timeout(Some(config.timeout))
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(
            graphql_url = %config.graphql_url,
            timeout = ?config.timeout,
            "Created GitHub client"
        );

        Ok(Self {
            http,
            octocrab,
            graphql_url: config.graphql_url.clone(),
            timeout: config.timeout,
            token,
        })
    }

    /// Create a client from the loaded configuration and secrets
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let token = secrets.require_github_token()?;
        Self::new(&config.github, token)
    }

    /// Per-request timeout shared by the GraphQL and REST clients
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl GraphQLTransport for GitHubClient {
    async fn execute(&self, query: &str, variables: Option<&Value>) -> Result<Value> {
        let mut body = json!({ "query": query });
        if let Some(vars) = variables {
            body["variables"] = vars.clone();
        }

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("GraphQL response is not JSON: {}", e)))?;

        debug!("GraphQL query successful");
        Ok(value)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("graphql_url", &self.graphql_url)
            .finish_non_exhaustive()
    }
}

/// Split a `nameWithOwner` value into owner and repository
///
/// Exactly one `/` with non-empty parts on both sides is accepted.
pub fn split_full_name(full_name: &str) -> Result<(String, String)> {
    let mut parts = full_name.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::MalformedRepository(full_name.to_string())),
    }
}
