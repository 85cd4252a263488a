//! Notify command - remind issue authors over Slack

use clap::{Args, ValueEnum};
use duewatch_core::{Config, Secrets};
use duewatch_notify::{messages, SlackNotifier, UserDirectory};
use tracing::{debug, info, warn};

use super::report::{run_check, Check, Finding};
use super::{fetch_items, github_client, select_projects, today};

/// Send Slack reminders
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Which reminder to send
    #[arg(value_enum)]
    pub reminder: Reminder,

    /// Only this project number (defaults to every open project)
    #[arg(short, long)]
    pub project: Option<u64>,

    /// Show who would be notified without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Reminder {
    /// Authors of issues without a due date
    MissingDueDate,
    /// Authors of issues without a Domain field
    MissingDomain,
}

impl Reminder {
    fn check(self) -> Check {
        match self {
            Reminder::MissingDueDate => Check::MissingDueDate,
            Reminder::MissingDomain => Check::MissingDomain,
        }
    }
}

impl NotifyArgs {
    /// Execute the notify command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let org = config.organization()?;
        let client = github_client(config, secrets)?;
        let timeout = config.github.timeout;

        // Tokens are checked before any GitHub traffic
        let notifier = if self.dry_run {
            None
        } else {
            let token = secrets.require_slack_bot_token()?;
            Some(SlackNotifier::new(&config.slack, token, timeout)?)
        };

        let directory_token = secrets.directory_token();
        let directory = UserDirectory::from_config(&config.directory, directory_token.as_deref(), timeout).await?;
        info!(users = directory.len(), "Loaded user directory");

        let today = today();
        let mut sent = 0usize;
        let mut failed = 0usize;

        for project in select_projects(&client, org, self.project).await? {
            let index = fetch_items(&client, config, org, &project).await?;
            let findings = run_check(&index, self.reminder.check(), &project, today)?;
            info!(project = project.number, count = findings.len(), "Issues needing a reminder");

            for finding in &findings {
                let (issue, login) = match finding {
                    Finding::MissingDueDate(f) => (&f.issue, f.author_login.as_deref()),
                    Finding::MissingDomain(f) => (&f.issue, f.author_login.as_deref()),
                    _ => continue,
                };

                let Some(login) = login else {
                    debug!(issue = %issue, "No author; skipping");
                    continue;
                };
                let Some(slack_id) = directory.slack_id_for(login) else {
                    debug!(issue = %issue, login, "Author not in user directory; skipping");
                    continue;
                };

                let link = issue.html_url();
                let blocks = match self.reminder {
                    Reminder::MissingDueDate => {
                        messages::missing_due_date_message(slack_id, &link, issue.number, &issue.title)
                    }
                    Reminder::MissingDomain => {
                        messages::missing_domain_message(slack_id, &link, issue.number, &issue.title)
                    }
                };

                let Some(notifier) = &notifier else {
                    println!("[Dry run] Would notify {} ({}) about {}", login, slack_id, issue);
                    continue;
                };

                match notifier.post(slack_id, blocks).await {
                    Ok(()) => {
                        info!(issue = %issue, login, "Reminder sent");
                        sent += 1;
                    }
                    Err(e) => {
                        warn!(issue = %issue, login, error = %e, "Failed to send reminder");
                        failed += 1;
                    }
                }
            }
        }

        if notifier.is_some() {
            println!("Sent {} reminder(s), failed {}", sent, failed);
        }
        Ok(())
    }
}
