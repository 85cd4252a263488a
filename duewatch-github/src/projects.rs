//! Organization project listing

use crate::graphql::{self, GraphQLTransport, Reply};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

const PROJECTS_QUERY: &str = r#"
query($org: String!) {
  organization(login: $org) {
    projectsV2(first: 100) {
      nodes {
        id
        title
        number
        closed
      }
    }
  }
}
"#;

const PROJECT_BY_NUMBER_QUERY: &str = r#"
query($org: String!, $number: Int!) {
  organization(login: $org) {
    projectV2(number: $number) {
      id
      title
      number
      closed
    }
  }
}
"#;

/// A Projects (v2) board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Opaque node id
    pub id: String,
    pub title: String,
    /// Ordinal number within the organization
    pub number: u64,
    pub closed: bool,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    organization: Option<ProjectsOrg>,
}

#[derive(Debug, Deserialize)]
struct ProjectsOrg {
    #[serde(rename = "projectsV2")]
    projects: ProjectNodes,
}

#[derive(Debug, Deserialize)]
struct ProjectNodes {
    nodes: Vec<Option<ProjectSummary>>,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    organization: Option<ProjectOrg>,
}

#[derive(Debug, Deserialize)]
struct ProjectOrg {
    #[serde(rename = "projectV2")]
    project: Option<ProjectSummary>,
}

/// The first 100 projects of `org`, open and closed
pub async fn list_projects(transport: &dyn GraphQLTransport, org: &str) -> Result<Vec<ProjectSummary>> {
    let data = graphql::query::<ProjectsData>(transport, PROJECTS_QUERY, json!({ "org": org }))
        .await?
        .into_result()?;

    let projects: Vec<ProjectSummary> = data
        .organization
        .ok_or_else(|| Error::NotFound(format!("organization {}", org)))?
        .projects
        .nodes
        .into_iter()
        .flatten()
        .collect();

    debug!(org, count = projects.len(), "Fetched projects");
    Ok(projects)
}

/// Projects of `org` that are not closed
pub async fn open_projects(transport: &dyn GraphQLTransport, org: &str) -> Result<Vec<ProjectSummary>> {
    let open: Vec<ProjectSummary> = list_projects(transport, org)
        .await?
        .into_iter()
        .filter(|p| !p.closed)
        .collect();

    if open.is_empty() {
        debug!(org, "No open projects found");
    }
    for project in &open {
        debug!(number = project.number, title = %project.title, "Open project");
    }
    Ok(open)
}

/// Project `number` of `org`, or `None` when it does not exist or errors
pub async fn project_by_number(
    transport: &dyn GraphQLTransport,
    org: &str,
    number: u64,
) -> Result<Option<ProjectSummary>> {
    let variables = json!({ "org": org, "number": number });
    match graphql::query::<ProjectData>(transport, PROJECT_BY_NUMBER_QUERY, variables).await? {
        Reply::Data(data) => Ok(data.organization.and_then(|o| o.project)),
        Reply::Failed(message) => {
            warn!(org, number, error = %message, "Errors in the query response for project");
            Ok(None)
        }
    }
}
