//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub REST API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Network-level failure talking to GitHub
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the GraphQL endpoint
    #[error("GraphQL request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// The response carried GraphQL `errors` or no `data`
    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    /// A repository, issue, project or label does not exist or is not visible
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit below the configured floor
    #[error("GitHub rate limit exhausted, resets at {0}")]
    RateLimited(String),

    /// `nameWithOwner` that is not exactly `owner/repo`
    #[error("Malformed repository name '{0}', expected owner/repo")]
    MalformedRepository(String),

    /// Due date that is not `YYYY-MM-DD`
    #[error("Invalid due date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration or secrets error
    #[error(transparent)]
    Config(#[from] duewatch_core::Error),
}
