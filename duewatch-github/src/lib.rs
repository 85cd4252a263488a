//! Duewatch GitHub - Projects (v2) access for due date hygiene
//!
//! This crate fetches project items over GraphQL, classifies them by their
//! DueDate, Status and Domain fields, and applies labels to offending issues.

pub mod actions;
mod classify;
mod client;
mod error;
pub mod fields;
mod graphql;
mod items;
pub mod labels;
pub mod projects;
mod ratelimit;
#[cfg(test)]
mod testing;

pub use actions::{Action, ActionOutcome};
pub use classify::{
    parse_due_date, IssueRef, NoDomainIssue, PastDueIssue, ResolvedLateIssue, UndatedIssue,
    UnlabeledIssue, BACKLOG_LABEL,
};
pub use client::{split_full_name, GitHubClient};
pub use error::{Error, Result};
pub use graphql::GraphQLTransport;
pub use items::{FieldKind, FieldValue, IssueContent, PageHook, ProjectItem, ProjectItemIndex};
pub use labels::LabelSpec;
pub use projects::ProjectSummary;
pub use ratelimit::{RateLimit, RateLimitGuard};
