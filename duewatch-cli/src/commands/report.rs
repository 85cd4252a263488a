//! Report command - print issues that fail a due date check

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use duewatch_core::{Config, Secrets};
use duewatch_github::{
    IssueRef, NoDomainIssue, PastDueIssue, ProjectItemIndex, ProjectSummary, ResolvedLateIssue,
    UndatedIssue, UnlabeledIssue,
};
use duewatch_github::labels::attach_author_ids;
use serde::Serialize;
use tracing::info;

use super::{fetch_items, github_client, select_projects, today};

/// Print issues matching a check
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Which check to run
    #[arg(value_enum)]
    pub check: Check,

    /// Only this project number (defaults to every open project)
    #[arg(short, long)]
    pub project: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Look up the author's node id for missing-due-date findings
    #[arg(long)]
    pub with_ids: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Check {
    /// Open issues whose due date has passed
    PastDue,
    /// Done issues whose due date has passed
    ResolvedLate,
    /// Issues without a due date
    MissingDueDate,
    /// Issues without a Domain field
    MissingDomain,
    /// Issues not labeled with their project's name
    MissingLabel,
}

/// One issue flagged by a check
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Finding {
    PastDue(PastDueIssue),
    ResolvedLate(ResolvedLateIssue),
    MissingDueDate(UndatedIssue),
    MissingDomain(NoDomainIssue),
    MissingLabel(UnlabeledIssue),
}

impl Finding {
    pub(crate) fn issue(&self) -> &IssueRef {
        match self {
            Finding::PastDue(f) => &f.issue,
            Finding::ResolvedLate(f) => &f.issue,
            Finding::MissingDueDate(f) => &f.issue,
            Finding::MissingDomain(f) => &f.issue,
            Finding::MissingLabel(f) => &f.issue,
        }
    }

    fn detail(&self) -> String {
        match self {
            Finding::PastDue(f) => format!("due {}", f.due_date),
            Finding::ResolvedLate(f) if f.backlog => format!("due {}, done, backlog", f.due_date),
            Finding::ResolvedLate(f) => format!("due {}, done", f.due_date),
            Finding::MissingDueDate(f) => match &f.author_id {
                Some(id) => format!("{} ({})", author(f.author_login.as_deref()), id),
                None => author(f.author_login.as_deref()),
            },
            Finding::MissingDomain(f) => author(f.author_login.as_deref()),
            Finding::MissingLabel(f) => format!("missing '{}'", f.label),
        }
    }
}

fn author(login: Option<&str>) -> String {
    format!("by {}", login.unwrap_or("unknown"))
}

/// Run `check` against one project's items
pub(crate) fn run_check(
    index: &ProjectItemIndex,
    check: Check,
    project: &ProjectSummary,
    today: NaiveDate,
) -> duewatch_github::Result<Vec<Finding>> {
    let findings = match check {
        Check::PastDue => index.past_due(today)?.into_iter().map(Finding::PastDue).collect(),
        Check::ResolvedLate => index
            .done_after_due_date(today)?
            .into_iter()
            .map(Finding::ResolvedLate)
            .collect(),
        Check::MissingDueDate => index
            .missing_due_date()?
            .into_iter()
            .map(Finding::MissingDueDate)
            .collect(),
        Check::MissingDomain => index
            .missing_domain()?
            .into_iter()
            .map(Finding::MissingDomain)
            .collect(),
        Check::MissingLabel => index
            .missing_label(&project.title)?
            .into_iter()
            .map(Finding::MissingLabel)
            .collect(),
    };
    Ok(findings)
}

#[derive(Debug, Serialize)]
struct ProjectReport {
    project: ProjectSummary,
    truncated: bool,
    findings: Vec<Finding>,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let org = config.organization()?;
        let client = github_client(config, secrets)?;
        let today = today();

        let mut reports = Vec::new();
        for project in select_projects(&client, org, self.project).await? {
            let index = fetch_items(&client, config, org, &project).await?;
            let mut findings = run_check(&index, self.check, &project, today)?;
            if self.with_ids {
                let undated = findings.iter_mut().filter_map(|f| match f {
                    Finding::MissingDueDate(u) => Some(u),
                    _ => None,
                });
                attach_author_ids(&client, undated).await?;
            }
            info!(
                project = project.number,
                check = ?self.check,
                items = index.len(),
                found = findings.len(),
                "Check complete"
            );
            reports.push(ProjectReport {
                project,
                truncated: index.is_truncated(),
                findings,
            });
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
            return Ok(());
        }

        if reports.is_empty() {
            println!("No open projects found.");
            return Ok(());
        }

        for report in &reports {
            let suffix = if report.truncated { " (incomplete)" } else { "" };
            println!(
                "Project #{}: {} ({} found){}",
                report.project.number,
                report.project.title,
                report.findings.len(),
                suffix
            );
            for finding in &report.findings {
                let issue = finding.issue();
                println!("  {}: {} [{}]", issue, issue.title, finding.detail());
            }
            println!();
        }
        Ok(())
    }
}
