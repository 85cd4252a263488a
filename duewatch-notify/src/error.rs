//! Error types for notification delivery

use thiserror::Error;

/// Result type for notify operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while notifying users
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Slack accepted the request but reported `ok: false`
    #[error("Slack error: {0}")]
    Slack(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// No directory endpoint configured
    #[error("Configuration error: {0}")]
    Config(String),
}
