//! Classification of project items by their custom fields
//!
//! Every classifier skips items without an issue, or whose issue lacks a
//! title or number, then decides from the item's field values. The
//! comparison date is passed in so callers decide what "today" means.

use crate::client::split_full_name;
use crate::fields::{contains_done, is_done_word, sanitize, DOMAIN_FIELD, DUE_DATE_FIELD, STATUS_FIELD};
use crate::items::{FieldValue, IssueContent, ProjectItem, ProjectItemIndex};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Label that exempts an issue from past-due labeling
pub const BACKLOG_LABEL: &str = "Backlog";

/// Identifies an issue in classification results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: String,
}

impl IssueRef {
    pub fn html_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}",
            self.owner, self.repo, self.number
        )
    }
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Open issue whose due date has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PastDueIssue {
    #[serde(flatten)]
    pub issue: IssueRef,
    pub due_date: NaiveDate,
}

/// Issue marked done whose due date has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLateIssue {
    #[serde(flatten)]
    pub issue: IssueRef,
    pub due_date: NaiveDate,
    /// Carries the `Backlog` label; not labeled by the resolved-late pass
    pub backlog: bool,
}

/// Issue with no due date set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndatedIssue {
    #[serde(flatten)]
    pub issue: IssueRef,
    pub author_login: Option<String>,
    /// Author node id; classification leaves it unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

/// Issue with no Domain field set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoDomainIssue {
    #[serde(flatten)]
    pub issue: IssueRef,
    pub author_login: Option<String>,
}

/// Issue missing a given label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlabeledIssue {
    #[serde(flatten)]
    pub issue: IssueRef,
    pub label: String,
}

/// What the classifiers need from one item's field values
#[derive(Debug, Default)]
struct FieldSummary<'a> {
    due_date: Option<&'a str>,
    statuses: Vec<String>,
    has_domain: bool,
}

impl<'a> FieldSummary<'a> {
    fn of(values: &'a [FieldValue]) -> Self {
        let mut summary = FieldSummary::default();
        for value in values {
            let name = sanitize(&value.field_name);
            if name == DUE_DATE_FIELD {
                if let Some(date) = value.date() {
                    summary.due_date = Some(date);
                }
            }
            if name == STATUS_FIELD {
                if let Some(status) = value.select_name() {
                    summary.statuses.push(sanitize(status));
                }
            }
            if name == DOMAIN_FIELD {
                summary.has_domain = true;
            }
        }
        summary
    }

    fn parsed_due_date(&self) -> Result<Option<NaiveDate>> {
        self.due_date.map(parse_due_date).transpose()
    }

    fn is_done_strict(&self) -> bool {
        self.statuses.iter().any(|s| is_done_word(s))
    }

    fn is_done_loose(&self) -> bool {
        self.statuses.iter().any(|s| contains_done(s))
    }
}

/// Parse a `YYYY-MM-DD` due date
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| Error::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Items that carry an issue with a title and number
fn issues<'a>(
    index: &'a ProjectItemIndex,
) -> impl Iterator<Item = Result<(IssueRef, &'a IssueContent, &'a ProjectItem)>> + 'a {
    index.items().iter().filter_map(|item| {
        let content = item.content.as_ref()?;
        let (title, number) = (content.title.as_ref()?, content.number?);
        let full_name = content.repository_full_name.as_deref().unwrap_or_default();
        Some(split_full_name(full_name).map(|(owner, repo)| {
            let issue = IssueRef {
                owner,
                repo,
                number,
                title: title.clone(),
            };
            (issue, content, item)
        }))
    })
}

impl ProjectItemIndex {
    /// Issues whose due date is strictly before `today`
    ///
    /// Skips issues labeled `Backlog` and issues whose status is the word
    /// "done".
    pub fn past_due(&self, today: NaiveDate) -> Result<Vec<PastDueIssue>> {
        let mut found = Vec::new();
        for entry in issues(self) {
            let (issue, content, item) = entry?;
            if content.has_label(BACKLOG_LABEL) {
                continue;
            }

            // the date is parsed before the done check, so done items fail too
            let fields = FieldSummary::of(&item.field_values);
            let due_date = fields.parsed_due_date()?;
            if fields.is_done_strict() {
                continue;
            }

            if let Some(due_date) = due_date {
                if due_date < today {
                    found.push(PastDueIssue { issue, due_date });
                }
            }
        }
        tracing::debug!(count = found.len(), "Classified past due issues");
        Ok(found)
    }

    /// Issues with no dated `DueDate` field
    pub fn missing_due_date(&self) -> Result<Vec<UndatedIssue>> {
        let mut found = Vec::new();
        for entry in issues(self) {
            let (issue, content, item) = entry?;
            if FieldSummary::of(&item.field_values).due_date.is_none() {
                found.push(UndatedIssue {
                    issue,
                    author_login: content.author_login.clone(),
                    author_id: None,
                });
            }
        }
        tracing::debug!(count = found.len(), "Classified issues without due date");
        Ok(found)
    }

    /// Issues with no field of any kind named `Domain`
    pub fn missing_domain(&self) -> Result<Vec<NoDomainIssue>> {
        let mut found = Vec::new();
        for entry in issues(self) {
            let (issue, content, item) = entry?;
            if !FieldSummary::of(&item.field_values).has_domain {
                found.push(NoDomainIssue {
                    issue,
                    author_login: content.author_login.clone(),
                });
            }
        }
        tracing::debug!(count = found.len(), "Classified issues without domain");
        Ok(found)
    }

    /// Issues whose status contains "done" and whose due date is before `today`
    ///
    /// `Backlog` issues are included and flagged.
    pub fn done_after_due_date(&self, today: NaiveDate) -> Result<Vec<ResolvedLateIssue>> {
        let mut found = Vec::new();
        for entry in issues(self) {
            let (issue, content, item) = entry?;
            let fields = FieldSummary::of(&item.field_values);
            if !fields.is_done_loose() {
                continue;
            }
            if let Some(due_date) = fields.parsed_due_date()? {
                if due_date < today {
                    found.push(ResolvedLateIssue {
                        issue,
                        due_date,
                        backlog: content.has_label(BACKLOG_LABEL),
                    });
                }
            }
        }
        tracing::debug!(count = found.len(), "Classified issues resolved late");
        Ok(found)
    }

    /// Issues that do not carry `label` exactly
    pub fn missing_label(&self, label: &str) -> Result<Vec<UnlabeledIssue>> {
        let mut found = Vec::new();
        for entry in issues(self) {
            let (issue, content, _) = entry?;
            if !content.has_label(label) {
                found.push(UnlabeledIssue {
                    issue,
                    label: label.to_string(),
                });
            }
        }
        Ok(found)
    }
}
