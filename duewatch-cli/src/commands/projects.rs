//! Projects command - list the organization's projects

use clap::Args;
use duewatch_core::{Config, Secrets};
use duewatch_github::projects;

use super::github_client;

/// List projects
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Include closed projects
    #[arg(short, long)]
    pub all: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ProjectsArgs {
    /// Execute the projects command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let org = config.organization()?;
        let client = github_client(config, secrets)?;

        let list = if self.all {
            projects::list_projects(&client, org).await?
        } else {
            projects::open_projects(&client, org).await?
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(());
        }

        if list.is_empty() {
            println!("No projects found.");
            return Ok(());
        }

        println!("Projects in {} ({} found)", org, list.len());
        println!();
        for project in list {
            let state = if project.closed { "●" } else { "○" };
            println!("{} #{}: {}", state, project.number, project.title);
        }
        Ok(())
    }
}
