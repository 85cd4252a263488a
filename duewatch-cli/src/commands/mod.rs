//! CLI command implementations

pub mod admin;
pub mod config;
pub mod label;
pub mod notify;
pub mod projects;
pub mod report;

pub use admin::AdminArgs;
pub use config::ConfigArgs;
pub use label::LabelArgs;
pub use notify::NotifyArgs;
pub use projects::ProjectsArgs;
pub use report::ReportArgs;

use duewatch_core::{Config, Secrets};
use duewatch_github::{projects as gh_projects, GitHubClient, PageHook, ProjectItemIndex, ProjectSummary, RateLimitGuard};
use tracing::warn;

/// Build the GitHub client, failing early when no token is configured
pub(crate) fn github_client(config: &Config, secrets: &Secrets) -> anyhow::Result<GitHubClient> {
    Ok(GitHubClient::from_config(config, secrets)?)
}

/// The single project `number`, or every open project of `org`
pub(crate) async fn select_projects(
    client: &GitHubClient,
    org: &str,
    number: Option<u64>,
) -> anyhow::Result<Vec<ProjectSummary>> {
    match number {
        Some(n) => gh_projects::project_by_number(client, org, n)
            .await?
            .map(|p| vec![p])
            .ok_or_else(|| anyhow::anyhow!("Project {} not found in organization {}", n, org)),
        None => Ok(gh_projects::open_projects(client, org).await?),
    }
}

/// Fetch every item of `project`, checking the rate limit before each page
pub(crate) async fn fetch_items(
    client: &GitHubClient,
    config: &Config,
    org: &str,
    project: &ProjectSummary,
) -> anyhow::Result<ProjectItemIndex> {
    let guard = RateLimitGuard::new(client, config.github.min_rate_remaining);
    let index = ProjectItemIndex::fetch(client, org, project.number, Some(&guard as &dyn PageHook)).await?;

    if index.is_truncated() {
        warn!(
            project = project.number,
            title = %project.title,
            items = index.len(),
            "Project items are incomplete; results cover only the pages fetched"
        );
    }
    Ok(index)
}

/// Local calendar date used for due date comparisons
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
