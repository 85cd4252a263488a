//! Duewatch Core - shared configuration for the duewatch tools
//!
//! Everything here is loaded once at process entry and then passed by
//! reference to the GitHub and notification clients.

pub mod config;
pub mod error;
pub mod secrets;

pub use config::{Config, DirectoryConfig, GitHubConfig, SlackConfig};
pub use error::{Error, Result};
pub use secrets::Secrets;
