//! Admin commands - operator actions on projects and repositories

use clap::{Args, Subcommand};
use duewatch_core::{Config, Secrets};
use duewatch_github::{actions, split_full_name, Action, ActionOutcome, RateLimitGuard};
use tracing::info;

use super::github_client;

/// Operator actions
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Create a project owned by the authenticated user
    CreateProject {
        /// Project title
        #[arg(long)]
        title: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Create a repository owned by the authenticated user
    CreateRepo {
        /// Repository name
        name: String,

        /// Repository description
        #[arg(long)]
        description: Option<String>,

        /// Make the repository private
        #[arg(long)]
        private: bool,
    },

    /// Add an existing issue to one of its repository's projects
    AddIssue {
        /// Repository (owner/repo format)
        #[arg(short, long)]
        repo: String,

        /// Exact issue title
        #[arg(long)]
        issue: String,

        /// Exact project title
        #[arg(long)]
        project: String,
    },
}

impl AdminCommand {
    fn to_action(&self) -> anyhow::Result<Action> {
        let action = match self {
            AdminCommand::CreateProject { title, description } => Action::CreateProject {
                title: title.clone(),
                description: description.clone(),
            },
            AdminCommand::CreateRepo {
                name,
                description,
                private,
            } => Action::CreateRepository {
                name: name.clone(),
                description: description.clone(),
                private: *private,
            },
            AdminCommand::AddIssue { repo, issue, project } => {
                let (owner, repo) = split_full_name(repo)?;
                Action::AddIssueToProject {
                    owner,
                    repo,
                    issue_title: issue.clone(),
                    project_title: project.clone(),
                }
            }
        };
        action.validate()?;
        Ok(action)
    }
}

impl AdminArgs {
    /// Execute the admin command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let action = self.command.to_action()?;
        let client = github_client(config, secrets)?;

        let viewer = actions::viewer(&client).await?;
        info!(login = %viewer.login, "Authenticated");

        RateLimitGuard::new(&client, config.github.min_rate_remaining)
            .check()
            .await?;

        match client.run_action(&action).await? {
            ActionOutcome::ProjectCreated { title, number, url, .. } => {
                println!("Created project #{}: {}", number, title);
                println!("  {}", url);
            }
            ActionOutcome::RepositoryCreated { full_name, url } => {
                println!("Created repository {}", full_name);
                if let Some(url) = url {
                    println!("  {}", url);
                }
            }
            ActionOutcome::ItemAdded { item_id } => {
                println!("Issue successfully added to the project (item {})", item_id);
            }
        }
        Ok(())
    }
}
