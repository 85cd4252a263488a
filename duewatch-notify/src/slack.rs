//! Slack chat.postMessage delivery

use crate::{NotifyError, Result};
use duewatch_core::SlackConfig;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Posts Block Kit messages as a bot user
pub struct SlackNotifier {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl SlackNotifier {
    pub fn new(config: &SlackConfig, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: config.post_message_url.clone(),
            token: token.into(),
        })
    }

    /// Send `blocks` to `channel` (a user id for direct messages)
    pub async fn post(&self, channel: &str, blocks: Value) -> Result<()> {
        let payload = json!({ "channel": channel, "blocks": blocks });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_response(status.as_u16(), &body)?;

        debug!(channel, "Message sent successfully");
        Ok(())
    }
}

impl std::fmt::Debug for SlackNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Slack reports most failures as HTTP 200 with `ok: false`
fn check_response(status: u16, body: &str) -> Result<()> {
    if !(200..300).contains(&status) {
        return Err(NotifyError::Status {
            service: "Slack",
            status,
            body: body.to_string(),
        });
    }

    let parsed: PostMessageResponse = serde_json::from_str(body)
        .map_err(|e| NotifyError::Parse(format!("Failed to parse Slack response: {}", e)))?;

    if parsed.ok {
        Ok(())
    } else {
        Err(NotifyError::Slack(
            parsed.error.unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}
