//! Duewatch Notify - Slack reminders for issue authors
//!
//! Maps GitHub logins to Slack user ids through the user directory and
//! delivers direct messages with `chat.postMessage`.

mod directory;
mod error;
pub mod messages;
mod slack;

pub use directory::{DirectoryUser, UserDirectory};
pub use error::{NotifyError, Result};
pub use slack::SlackNotifier;
