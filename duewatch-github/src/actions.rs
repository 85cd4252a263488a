//! Operator actions: project and repository creation, attaching issues
//!
//! Each action takes validated, structured input and runs one fixed
//! sequence of calls. Nothing here prompts.

use crate::graphql::{self, GraphQLTransport, Reply};
use crate::{Error, GitHubClient, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

const VIEWER_QUERY: &str = r#"
query {
  viewer {
    id
    login
  }
}
"#;

const CREATE_PROJECT_MUTATION: &str = r#"
mutation($ownerId: ID!, $title: String!) {
  createProjectV2(input: {ownerId: $ownerId, title: $title}) {
    projectV2 {
      id
      title
      number
      url
    }
  }
}
"#;

const UPDATE_PROJECT_DESCRIPTION_MUTATION: &str = r#"
mutation($projectId: ID!, $description: String!) {
  updateProjectV2(input: {projectId: $projectId, shortDescription: $description}) {
    projectV2 {
      id
    }
  }
}
"#;

const REPOSITORY_PROJECTS_QUERY: &str = r#"
query($owner: String!, $repoName: String!) {
  repository(owner: $owner, name: $repoName) {
    projectsV2(first: 100) {
      nodes {
        id
        title
      }
    }
  }
}
"#;

const ADD_ITEM_MUTATION: &str = r#"
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
    item {
      id
    }
  }
}
"#;

/// The closed set of operator actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a project owned by the authenticated user
    CreateProject {
        title: String,
        description: Option<String>,
    },
    /// Create a repository owned by the authenticated user
    CreateRepository {
        name: String,
        description: Option<String>,
        private: bool,
    },
    /// Add the issue titled `issue_title` in `owner/repo` to the repository
    /// project titled `project_title`
    AddIssueToProject {
        owner: String,
        repo: String,
        issue_title: String,
        project_title: String,
    },
}

impl Action {
    /// Reject blank names before any request is made
    pub fn validate(&self) -> Result<()> {
        let required: Vec<(&str, &str)> = match self {
            Action::CreateProject { title, .. } => vec![("title", title)],
            Action::CreateRepository { name, .. } => vec![("name", name)],
            Action::AddIssueToProject {
                owner,
                repo,
                issue_title,
                project_title,
            } => vec![
                ("owner", owner),
                ("repo", repo),
                ("issue title", issue_title),
                ("project title", project_title),
            ],
        };

        for (what, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Parse(format!("{} must not be empty", what)));
            }
        }
        Ok(())
    }
}

/// What an action produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    ProjectCreated {
        id: String,
        title: String,
        number: u64,
        url: String,
    },
    RepositoryCreated {
        full_name: String,
        url: Option<String>,
    },
    ItemAdded {
        item_id: String,
    },
}

/// The authenticated user
#[derive(Debug, Clone, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project_v2: Option<CreatedProject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedProject {
    project_v2: Option<NewProject>,
}

#[derive(Debug, Deserialize)]
struct NewProject {
    id: String,
    title: String,
    number: u64,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryProjectsData {
    repository: Option<RepositoryProjects>,
}

#[derive(Debug, Deserialize)]
struct RepositoryProjects {
    #[serde(rename = "projectsV2")]
    projects: ProjectNodes,
}

#[derive(Debug, Deserialize)]
struct ProjectNodes {
    nodes: Vec<Option<NamedProject>>,
}

#[derive(Debug, Deserialize)]
struct NamedProject {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemData {
    add_project_v2_item_by_id: Option<AddedItem>,
}

#[derive(Debug, Deserialize)]
struct AddedItem {
    item: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    id: String,
}

/// The user the token belongs to; fails when the token is rejected
pub async fn viewer(transport: &dyn GraphQLTransport) -> Result<Viewer> {
    match graphql::query::<ViewerData>(transport, VIEWER_QUERY, json!({})).await {
        Ok(Reply::Data(data)) => Ok(data.viewer),
        Ok(Reply::Failed(message)) => Err(Error::Auth(format!("Token is invalid or expired: {}", message))),
        Err(Error::Status { status: 401, .. }) => Err(Error::Auth("Token is invalid or expired".to_string())),
        Err(e) => Err(e),
    }
}

/// Create a project for `owner_id`, optionally setting its short description
pub async fn create_project(
    transport: &dyn GraphQLTransport,
    owner_id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<ActionOutcome> {
    let variables = json!({ "ownerId": owner_id, "title": title });
    let created = graphql::query::<CreateProjectData>(transport, CREATE_PROJECT_MUTATION, variables)
        .await?
        .into_result()?
        .create_project_v2
        .and_then(|c| c.project_v2)
        .ok_or_else(|| Error::GraphQL("createProjectV2 returned no project".to_string()))?;

    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        let variables = json!({ "projectId": created.id, "description": description });
        graphql::query::<serde_json::Value>(transport, UPDATE_PROJECT_DESCRIPTION_MUTATION, variables)
            .await?
            .into_result()?;
        debug!(project_id = %created.id, "Project description set");
    }

    info!(id = %created.id, title = %created.title, number = created.number, "Project created");
    Ok(ActionOutcome::ProjectCreated {
        id: created.id,
        title: created.title,
        number: created.number,
        url: created.url,
    })
}

/// Node id of the project titled `title` linked to `owner/repo`
pub async fn find_repository_project(
    transport: &dyn GraphQLTransport,
    owner: &str,
    repo: &str,
    title: &str,
) -> Result<String> {
    let variables = json!({ "owner": owner, "repoName": repo });
    let data = graphql::query::<RepositoryProjectsData>(transport, REPOSITORY_PROJECTS_QUERY, variables)
        .await?
        .into_result()?;

    data.repository
        .ok_or_else(|| Error::NotFound(format!("repository {}/{}", owner, repo)))?
        .projects
        .nodes
        .into_iter()
        .flatten()
        .find(|p| p.title == title)
        .map(|p| p.id)
        .ok_or_else(|| Error::NotFound(format!("project '{}' in {}/{}", title, owner, repo)))
}

/// Add content (an issue node) to a project
pub async fn add_item_to_project(
    transport: &dyn GraphQLTransport,
    project_id: &str,
    content_id: &str,
) -> Result<ActionOutcome> {
    let variables = json!({ "projectId": project_id, "contentId": content_id });
    let item_id = graphql::query::<AddItemData>(transport, ADD_ITEM_MUTATION, variables)
        .await?
        .into_result()?
        .add_project_v2_item_by_id
        .and_then(|a| a.item)
        .map(|i| i.id)
        .ok_or_else(|| Error::GraphQL("addProjectV2ItemById returned no item".to_string()))?;

    info!(project_id, content_id, item_id = %item_id, "Issue successfully added to the project");
    Ok(ActionOutcome::ItemAdded { item_id })
}

impl GitHubClient {
    /// Run one operator action
    pub async fn run_action(&self, action: &Action) -> Result<ActionOutcome> {
        action.validate()?;

        match action {
            Action::CreateProject { title, description } => {
                let viewer = viewer(self).await?;
                create_project(self, &viewer.id, title, description.as_deref()).await
            }
            Action::CreateRepository {
                name,
                description,
                private,
            } => self.create_repository(name, description.as_deref(), *private).await,
            Action::AddIssueToProject {
                owner,
                repo,
                issue_title,
                project_title,
            } => {
                let issue_node = self.find_issue_node_by_title(owner, repo, issue_title).await?;
                let project_id = find_repository_project(self, owner, repo, project_title).await?;
                add_item_to_project(self, &project_id, &issue_node).await
            }
        }
    }

    async fn create_repository(
        &self,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<ActionOutcome> {
        let body = json!({
            "name": name,
            "description": description.unwrap_or_default(),
            "private": private,
        });

        let repo: octocrab::models::Repository = self
            .client()
            .post("/user/repos", Some(&body))
            .await
            .map_err(Error::Api)?;

        let full_name = repo.full_name.unwrap_or_else(|| repo.name.clone());
        info!(full_name = %full_name, "Repository created successfully");
        Ok(ActionOutcome::RepositoryCreated {
            full_name,
            url: repo.html_url.map(|u| u.to_string()),
        })
    }

    /// Node id of the first issue in `owner/repo` titled exactly `title`
    async fn find_issue_node_by_title(&self, owner: &str, repo: &str, title: &str) -> Result<String> {
        debug!(owner, repo, title, "Searching issues by title");

        let first_page = self
            .client()
            .issues(owner, repo)
            .list()
            .state(octocrab::params::State::All)
            .per_page(100)
            .send()
            .await
            .map_err(Error::Api)?;

        let issues = self.client().all_pages(first_page).await.map_err(Error::Api)?;

        issues
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .find(|i| i.title == title)
            .map(|i| i.node_id)
            .ok_or_else(|| Error::NotFound(format!("issue titled '{}' in {}/{}", title, owner, repo)))
    }
}
