//! Label command - mark issues that fail a due date check

use clap::{Args, ValueEnum};
use duewatch_core::{Config, Secrets};
use duewatch_github::labels::{IssueLabeler, LabelOutcome};
use duewatch_github::{GitHubClient, IssueRef, LabelSpec};
use tracing::{debug, info, warn};

use super::report::{run_check, Check, Finding};
use super::{fetch_items, github_client, select_projects, today};

/// Label issues matching a check
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Which label to apply
    #[arg(value_enum)]
    pub label: LabelKind,

    /// Only this project number (defaults to every open project)
    #[arg(short, long)]
    pub project: Option<u64>,

    /// Show what would be labeled without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelKind {
    /// "Past Due" on open issues whose due date has passed
    PastDue,
    /// "Resolved Late" on done issues whose due date has passed
    ResolvedLate,
    /// The project's title on issues missing it
    ProjectName,
}

impl LabelKind {
    fn check(self) -> Check {
        match self {
            LabelKind::PastDue => Check::PastDue,
            LabelKind::ResolvedLate => Check::ResolvedLate,
            LabelKind::ProjectName => Check::MissingLabel,
        }
    }

    fn spec(self, project_title: &str) -> LabelSpec<'_> {
        match self {
            LabelKind::PastDue => LabelSpec::PAST_DUE,
            LabelKind::ResolvedLate => LabelSpec::RESOLVED_LATE,
            LabelKind::ProjectName => LabelSpec::named(project_title),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    labeled: usize,
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: LabelOutcome) {
        match outcome {
            LabelOutcome::Labeled => self.labeled += 1,
            LabelOutcome::Skipped => self.skipped += 1,
            LabelOutcome::Rejected => self.failed += 1,
        }
    }
}

/// Backlog issues are reported as resolved late but never labeled
fn should_label(finding: &Finding) -> bool {
    !matches!(finding, Finding::ResolvedLate(f) if f.backlog)
}

/// Attach a label named after the project through REST; GitHub creates
/// the label on first use
async fn label_by_name(
    client: &GitHubClient,
    issue: &IssueRef,
    name: &str,
) -> duewatch_github::Result<LabelOutcome> {
    let applied = client
        .add_issue_labels(&issue.owner, &issue.repo, issue.number, &[name.to_string()])
        .await?;
    if applied.iter().any(|l| l == name) {
        Ok(LabelOutcome::Labeled)
    } else {
        Ok(LabelOutcome::Rejected)
    }
}

impl LabelArgs {
    /// Execute the label command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let org = config.organization()?;
        let client = github_client(config, secrets)?;
        let today = today();
        let mut labeler = IssueLabeler::new(&client);
        let mut tally = Tally::default();

        for project in select_projects(&client, org, self.project).await? {
            let index = fetch_items(&client, config, org, &project).await?;
            let findings = run_check(&index, self.label.check(), &project, today)?;
            let spec = self.label.spec(&project.title);

            info!(
                project = project.number,
                label = spec.name,
                count = findings.len(),
                "Issues to label"
            );

            for finding in &findings {
                let issue = finding.issue();

                if !should_label(finding) {
                    debug!(issue = %issue, "Backlog issue; not labeling");
                    continue;
                }

                if self.dry_run {
                    println!("[Dry run] Would label {} '{}' with '{}'", issue, issue.title, spec.name);
                    continue;
                }

                let result = match self.label {
                    LabelKind::ProjectName => label_by_name(&client, issue, spec.name).await,
                    _ => labeler.label(&issue.owner, &issue.repo, issue.number, &spec).await,
                };
                match result {
                    Ok(outcome) => {
                        match outcome {
                            LabelOutcome::Labeled => info!(issue = %issue, label = spec.name, "Label added"),
                            LabelOutcome::Skipped => debug!(issue = %issue, "Skipped"),
                            LabelOutcome::Rejected => {
                                warn!(issue = %issue, label = spec.name, "Label was not applied")
                            }
                        }
                        tally.record(outcome);
                    }
                    Err(e) => {
                        warn!(issue = %issue, label = spec.name, error = %e, "Failed to label issue");
                        tally.failed += 1;
                    }
                }
            }
        }

        if !self.dry_run {
            println!(
                "Labeled {} issue(s), skipped {}, failed {}",
                tally.labeled, tally.skipped, tally.failed
            );
        }
        Ok(())
    }
}
