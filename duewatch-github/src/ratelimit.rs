//! GraphQL rate limit checks

use crate::graphql::{self, GraphQLTransport, Reply};
use crate::items::PageHook;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

const RATE_LIMIT_QUERY: &str = r#"
query {
  rateLimit {
    remaining
    resetAt
  }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitData {
    rate_limit: Option<RateLimit>,
}

/// Remaining GraphQL quota
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub remaining: u32,
    pub reset_at: String,
}

/// Refuses to continue when fewer than `min_remaining` points are left
///
/// Used as a [`PageHook`] between item pages and once before operator
/// actions. Never waits or retries.
pub struct RateLimitGuard<'a> {
    transport: &'a dyn GraphQLTransport,
    min_remaining: u32,
}

impl<'a> RateLimitGuard<'a> {
    pub fn new(transport: &'a dyn GraphQLTransport, min_remaining: u32) -> Self {
        Self {
            transport,
            min_remaining,
        }
    }

    /// Current quota, or `None` when GitHub did not report one
    pub async fn current(&self) -> Result<Option<RateLimit>> {
        match graphql::query::<RateLimitData>(self.transport, RATE_LIMIT_QUERY, json!({})).await? {
            Reply::Data(data) => Ok(data.rate_limit),
            Reply::Failed(message) => {
                warn!(error = %message, "Failed to fetch rate limit status");
                Ok(None)
            }
        }
    }

    /// Fail with [`Error::RateLimited`] when the quota is below the floor
    pub async fn check(&self) -> Result<()> {
        match self.current().await? {
            Some(limit) if limit.remaining < self.min_remaining => {
                Err(Error::RateLimited(limit.reset_at))
            }
            Some(limit) => {
                debug!(remaining = limit.remaining, "Rate limit OK");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PageHook for RateLimitGuard<'_> {
    async fn before_page(&self, page: usize) -> Result<()> {
        debug!(page, "Checking rate limit before page");
        self.check().await
    }
}
