//! Node id lookups and label mutations
//!
//! Lookups return `Ok(None)` when GitHub answers with GraphQL errors or a
//! null node; callers skip that issue and carry on.

use crate::graphql::{self, GraphQLTransport, Reply};
use crate::{Error, GitHubClient, Result, UndatedIssue};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info, warn};

const REPOSITORY_ID_QUERY: &str = r#"
query($organization: String!, $repo: String!) {
  organization(login: $organization) {
    repository(name: $repo) {
      id
    }
  }
}
"#;

const USER_ID_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    id
  }
}
"#;

const ISSUE_ID_QUERY: &str = r#"
query($organization: String!, $repo: String!, $number: Int!) {
  organization(login: $organization) {
    repository(name: $repo) {
      issue(number: $number) {
        id
      }
    }
  }
}
"#;

const LABEL_QUERY: &str = r#"
query($organization: String!, $repo: String!, $name: String!) {
  organization(login: $organization) {
    repository(name: $repo) {
      label(name: $name) {
        id
      }
    }
  }
}
"#;

const CREATE_LABEL_MUTATION: &str = r#"
mutation($repositoryId: ID!, $name: String!, $color: String!, $description: String) {
  createLabel(input: {repositoryId: $repositoryId, name: $name, color: $color, description: $description}) {
    label {
      id
      name
    }
  }
}
"#;

const ADD_LABELS_MUTATION: &str = r#"
mutation($issueId: ID!, $labelIds: [ID!]!) {
  addLabelsToLabelable(input: {labelableId: $issueId, labelIds: $labelIds}) {
    labelable {
      labels(first: 10) {
        nodes {
          name
        }
      }
    }
  }
}
"#;

/// Name, color and description used when a label has to be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpec<'a> {
    pub name: &'a str,
    /// Hex color without `#`
    pub color: &'a str,
    pub description: &'a str,
}

impl<'a> LabelSpec<'a> {
    pub const PAST_DUE: LabelSpec<'static> = LabelSpec {
        name: "Past Due",
        color: "FFC0CB",
        description: "This issue is past due",
    };

    pub const RESOLVED_LATE: LabelSpec<'static> = LabelSpec {
        name: "Resolved Late",
        color: "E67E22",
        description: "This issue is resolved after due date.",
    };

    /// The known spec for `name`, or a grey label with no description
    pub fn named(name: &'a str) -> LabelSpec<'a> {
        match name {
            n if n == Self::PAST_DUE.name => Self::PAST_DUE,
            n if n == Self::RESOLVED_LATE.name => Self::RESOLVED_LATE,
            _ => LabelSpec {
                name,
                color: "EDEDED",
                description: "",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrgData<T> {
    organization: Option<RepositoryData<T>>,
}

#[derive(Debug, Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Node {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<Node>,
}

#[derive(Debug, Deserialize)]
struct IssueHolder {
    issue: Option<Node>,
}

#[derive(Debug, Deserialize)]
struct LabelHolder {
    label: Option<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLabelData {
    create_label: Option<CreatedLabel>,
}

#[derive(Debug, Deserialize)]
struct CreatedLabel {
    label: Option<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddLabelsData {
    add_labels_to_labelable: Option<Labelable>,
}

#[derive(Debug, Deserialize)]
struct Labelable {
    labelable: Option<LabelList>,
}

#[derive(Debug, Deserialize)]
struct LabelList {
    labels: Option<LabelNodes>,
}

#[derive(Debug, Deserialize)]
struct LabelNodes {
    nodes: Vec<Option<LabelName>>,
}

#[derive(Debug, Deserialize)]
struct LabelName {
    name: String,
}

/// Node id of `org/repo`, or `None` when it is missing or not visible
pub async fn resolve_repository_id(
    transport: &dyn GraphQLTransport,
    org: &str,
    repo: &str,
) -> Result<Option<String>> {
    let variables = json!({ "organization": org, "repo": repo });
    let reply = graphql::query::<OrgData<Node>>(transport, REPOSITORY_ID_QUERY, variables).await?;

    let id = match reply {
        Reply::Data(data) => data.organization.and_then(|o| o.repository).map(|r| r.id),
        Reply::Failed(message) => {
            warn!(org, repo, error = %message, "Repository lookup failed");
            None
        }
    };

    match &id {
        Some(id) => debug!(org, repo, id = %id, "Repository ID fetched"),
        None => warn!(org, repo, "Repository not found or access issue"),
    }
    Ok(id)
}

/// Node id of issue `number` in `org/repo`, or `None` when missing
pub async fn resolve_issue_id(
    transport: &dyn GraphQLTransport,
    org: &str,
    repo: &str,
    number: u64,
) -> Result<Option<String>> {
    let variables = json!({ "organization": org, "repo": repo, "number": number });
    let reply = graphql::query::<OrgData<IssueHolder>>(transport, ISSUE_ID_QUERY, variables).await?;

    let id = match reply {
        Reply::Data(data) => data
            .organization
            .and_then(|o| o.repository)
            .and_then(|r| r.issue)
            .map(|i| i.id),
        Reply::Failed(message) => {
            warn!(org, repo, number, error = %message, "Issue lookup failed");
            None
        }
    };

    match &id {
        Some(id) => debug!(org, repo, number, id = %id, "Issue ID fetched"),
        None => warn!(org, repo, number, "Issue not found or access issue"),
    }
    Ok(id)
}

/// Node id of the user `login`, or `None` when unknown
pub async fn resolve_user_id(transport: &dyn GraphQLTransport, login: &str) -> Result<Option<String>> {
    let variables = json!({ "login": login });
    let reply = graphql::query::<UserData>(transport, USER_ID_QUERY, variables).await?;

    let id = match reply {
        Reply::Data(data) => data.user.map(|u| u.id),
        Reply::Failed(message) => {
            warn!(login, error = %message, "User lookup failed");
            None
        }
    };

    match &id {
        Some(id) => debug!(login, id = %id, "User ID fetched"),
        None => warn!(login, "User not found"),
    }
    Ok(id)
}

/// Fill `author_id` on each issue with a known author, one lookup per login
pub async fn attach_author_ids<'a>(
    transport: &dyn GraphQLTransport,
    issues: impl IntoIterator<Item = &'a mut UndatedIssue>,
) -> Result<()> {
    let mut ids: HashMap<String, Option<String>> = HashMap::new();
    for issue in issues {
        let Some(login) = issue.author_login.as_deref() else {
            continue;
        };
        let id = match ids.get(login) {
            Some(id) => id.clone(),
            None => {
                let id = resolve_user_id(transport, login).await?;
                ids.insert(login.to_string(), id.clone());
                id
            }
        };
        issue.author_id = id;
    }
    Ok(())
}

/// Id of the label named `spec.name` in `org/repo`, created if absent
///
/// Lookup precedes creation, so repeated calls reuse the label; GitHub
/// rejects duplicate label names if two runs race.
pub async fn resolve_or_create_label(
    transport: &dyn GraphQLTransport,
    org: &str,
    repo: &str,
    repository_id: &str,
    spec: &LabelSpec<'_>,
) -> Result<String> {
    let variables = json!({ "organization": org, "repo": repo, "name": spec.name });
    let data = graphql::query::<OrgData<LabelHolder>>(transport, LABEL_QUERY, variables)
        .await?
        .into_result()?;

    let holder = data
        .organization
        .and_then(|o| o.repository)
        .ok_or_else(|| Error::NotFound(format!("repository {}/{}", org, repo)))?;

    if let Some(label) = holder.label {
        debug!(org, repo, label = spec.name, id = %label.id, "Label ID fetched");
        return Ok(label.id);
    }

    let variables = json!({
        "repositoryId": repository_id,
        "name": spec.name,
        "color": spec.color,
        "description": spec.description,
    });
    let created = graphql::query::<CreateLabelData>(transport, CREATE_LABEL_MUTATION, variables)
        .await?
        .into_result()?;

    let id = created
        .create_label
        .and_then(|c| c.label)
        .map(|l| l.id)
        .ok_or_else(|| Error::GraphQL(format!("createLabel returned no label for '{}'", spec.name)))?;

    info!(org, repo, label = spec.name, id = %id, "Label created");
    Ok(id)
}

/// Attach one label to one issue
///
/// A GraphQL-level rejection is logged and reported as `Ok(false)`.
pub async fn apply_label(
    transport: &dyn GraphQLTransport,
    issue_id: &str,
    label_id: &str,
) -> Result<bool> {
    let variables = json!({ "issueId": issue_id, "labelIds": [label_id] });
    match graphql::query::<AddLabelsData>(transport, ADD_LABELS_MUTATION, variables).await? {
        Reply::Data(data) => {
            let labels: Vec<String> = data
                .add_labels_to_labelable
                .and_then(|a| a.labelable)
                .and_then(|l| l.labels)
                .map(|l| l.nodes.into_iter().flatten().map(|n| n.name).collect())
                .unwrap_or_default();
            debug!(issue_id, ?labels, "Labels added to the issue");
            Ok(true)
        }
        Reply::Failed(message) => {
            warn!(issue_id, label_id, error = %message, "Error adding label to the issue");
            Ok(false)
        }
    }
}

/// Result of labeling one issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOutcome {
    Labeled,
    /// Repository or issue id did not resolve
    Skipped,
    /// The label mutation came back with GraphQL errors
    Rejected,
}

/// Labels issues over GraphQL, resolving repository and label ids once
pub struct IssueLabeler<'a> {
    transport: &'a dyn GraphQLTransport,
    repository_ids: HashMap<(String, String), Option<String>>,
    label_ids: HashMap<(String, String, String), String>,
}

impl<'a> IssueLabeler<'a> {
    pub fn new(transport: &'a dyn GraphQLTransport) -> Self {
        Self {
            transport,
            repository_ids: HashMap::new(),
            label_ids: HashMap::new(),
        }
    }

    /// repository id -> issue id -> label id (created if absent) -> attach
    pub async fn label(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
        spec: &LabelSpec<'_>,
    ) -> Result<LabelOutcome> {
        let repo_key = (owner.to_string(), repo.to_string());
        let repository_id = match self.repository_ids.get(&repo_key) {
            Some(id) => id.clone(),
            None => {
                let id = resolve_repository_id(self.transport, owner, repo).await?;
                self.repository_ids.insert(repo_key, id.clone());
                id
            }
        };
        let Some(repository_id) = repository_id else {
            return Ok(LabelOutcome::Skipped);
        };

        let Some(issue_id) = resolve_issue_id(self.transport, owner, repo, number).await? else {
            return Ok(LabelOutcome::Skipped);
        };

        let label_key = (owner.to_string(), repo.to_string(), spec.name.to_string());
        let label_id = match self.label_ids.get(&label_key) {
            Some(id) => id.clone(),
            None => {
                let id = resolve_or_create_label(self.transport, owner, repo, &repository_id, spec).await?;
                self.label_ids.insert(label_key, id.clone());
                id
            }
        };

        if apply_label(self.transport, &issue_id, &label_id).await? {
            Ok(LabelOutcome::Labeled)
        } else {
            Ok(LabelOutcome::Rejected)
        }
    }
}

impl GitHubClient {
    /// Add labels to an issue through the REST API
    ///
    /// Labels that do not exist yet are created by GitHub with default colors.
    pub async fn add_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<String>> {
        debug!(owner, repo, number, ?labels, "Adding labels via REST");

        let applied = self
            .client()
            .issues(owner, repo)
            .add_labels(number, labels)
            .await
            .map_err(Error::Api)?;

        Ok(applied.into_iter().map(|l| l.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::Value;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_resolve_repository_id() {
        let transport = ScriptedTransport::from_replies(vec![Ok(json!({
            "data": { "organization": { "repository": { "id": "R_1" } } }
        }))]);

        let id = resolve_repository_id(&transport, "acme", "widgets").await.unwrap();
        assert_eq!(id.as_deref(), Some("R_1"));

        let (_, vars) = &transport.calls()[0];
        let vars = vars.as_ref().unwrap();
        assert_eq!(vars["organization"], "acme");
        assert_eq!(vars["repo"], "widgets");
    }

    #[tokio::test]
    async fn test_missing_repository_is_none() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(json!({ "data": { "organization": { "repository": null } } })),
            Ok(json!({ "data": { "organization": null } })),
            Ok(json!({ "errors": [{ "message": "Could not resolve to a Repository" }] })),
        ]);

        for _ in 0..3 {
            let id = resolve_repository_id(&transport, "acme", "gone").await.unwrap();
            assert!(id.is_none());
        }
    }

    #[tokio::test]
    async fn test_resolve_issue_id() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(json!({ "data": { "organization": { "repository": { "issue": { "id": "I_9" } } } } })),
            Ok(json!({ "data": { "organization": { "repository": { "issue": null } } } })),
        ]);

        let found = resolve_issue_id(&transport, "acme", "widgets", 9).await.unwrap();
        assert_eq!(found.as_deref(), Some("I_9"));
        let missing = resolve_issue_id(&transport, "acme", "widgets", 10).await.unwrap();
        assert!(missing.is_none());

        assert_eq!(transport.calls()[0].1.as_ref().unwrap()["number"], 9);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_from_lookup() {
        let transport = ScriptedTransport::from_replies(vec![Err(Error::Status {
            status: 401,
            body: "Bad credentials".to_string(),
        })]);

        let result = resolve_issue_id(&transport, "acme", "widgets", 1).await;
        assert!(matches!(result, Err(Error::Status { status: 401, .. })));
    }

    /// Repository whose label set lives in memory, so lookups see earlier creations
    fn label_server() -> (ScriptedTransport, std::sync::Arc<Mutex<Vec<(String, String, String)>>>) {
        let created = std::sync::Arc::new(Mutex::new(Vec::<(String, String, String)>::new()));
        let store = created.clone();
        let transport = ScriptedTransport::new(move |query, vars| {
            let vars = vars.cloned().unwrap_or(Value::Null);
            let mut labels = store.lock().unwrap();
            if query.contains("createLabel") {
                let name = vars["name"].as_str().unwrap().to_string();
                let color = vars["color"].as_str().unwrap().to_string();
                let id = format!("LA_{}", labels.len() + 1);
                labels.push((id.clone(), name.clone(), color));
                return Ok(json!({ "data": { "createLabel": { "label": { "id": id, "name": name } } } }));
            }
            let name = vars["name"].as_str().unwrap();
            let label = labels
                .iter()
                .find(|(_, n, _)| n == name)
                .map(|(id, _, _)| json!({ "id": id }))
                .unwrap_or(Value::Null);
            Ok(json!({ "data": { "organization": { "repository": { "label": label } } } }))
        });
        (transport, created)
    }

    #[tokio::test]
    async fn test_label_created_once_and_reused() {
        let (transport, created) = label_server();

        let first = resolve_or_create_label(&transport, "acme", "widgets", "R_1", &LabelSpec::PAST_DUE)
            .await
            .unwrap();
        let second = resolve_or_create_label(&transport, "acme", "widgets", "R_1", &LabelSpec::PAST_DUE)
            .await
            .unwrap();

        assert_eq!(first, second);
        let created = created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1, "Past Due");
        assert_eq!(created[0].2, "FFC0CB");
        // lookup, create, lookup
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_resolved_late_label_uses_its_own_spec() {
        let (transport, created) = label_server();

        resolve_or_create_label(&transport, "acme", "widgets", "R_1", &LabelSpec::named("Resolved Late"))
            .await
            .unwrap();

        let created = created.lock().unwrap();
        assert_eq!(created[0].1, "Resolved Late");
        assert_eq!(created[0].2, "E67E22");

        let (_, vars) = transport.calls().pop().unwrap();
        let vars = vars.unwrap();
        assert_eq!(vars["repositoryId"], "R_1");
        assert_eq!(vars["description"], "This issue is resolved after due date.");
    }

    #[tokio::test]
    async fn test_label_lookup_error_is_fatal() {
        let transport = ScriptedTransport::from_replies(vec![Ok(json!({
            "errors": [{ "message": "Resource not accessible by integration" }]
        }))]);

        let result =
            resolve_or_create_label(&transport, "acme", "widgets", "R_1", &LabelSpec::PAST_DUE).await;
        assert!(matches!(result, Err(Error::GraphQL(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_named_spec_fallback() {
        let spec = LabelSpec::named("Roadmap");
        assert_eq!(spec.name, "Roadmap");
        assert_eq!(spec.color, "EDEDED");
        assert_eq!(LabelSpec::named("Past Due"), LabelSpec::PAST_DUE);
    }

    #[tokio::test]
    async fn test_apply_label() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(json!({ "data": { "addLabelsToLabelable": { "labelable": {
                "labels": { "nodes": [{ "name": "bug" }, { "name": "Past Due" }] }
            } } } })),
            Ok(json!({ "errors": [{ "message": "Could not resolve to a node" }] })),
        ]);

        assert!(apply_label(&transport, "I_1", "LA_1").await.unwrap());
        assert!(!apply_label(&transport, "I_2", "LA_1").await.unwrap());

        let vars = transport.calls()[0].1.clone().unwrap();
        assert_eq!(vars["issueId"], "I_1");
        assert_eq!(vars["labelIds"], json!(["LA_1"]));
    }

    #[tokio::test]
    async fn test_resolve_user_id() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(json!({ "data": { "user": { "id": "U_kgDO" } } })),
            Ok(json!({ "data": { "user": null } })),
            Ok(json!({ "data": { "user": null }, "errors": [{ "message": "Could not resolve to a User" }] })),
        ]);

        let found = resolve_user_id(&transport, "octocat").await.unwrap();
        assert_eq!(found.as_deref(), Some("U_kgDO"));
        assert!(resolve_user_id(&transport, "ghost").await.unwrap().is_none());
        assert!(resolve_user_id(&transport, "ghost").await.unwrap().is_none());

        assert_eq!(transport.calls()[0].1.as_ref().unwrap()["login"], "octocat");
    }

    #[tokio::test]
    async fn test_user_lookup_transport_error_propagates() {
        let transport = ScriptedTransport::from_replies(vec![Err(Error::Status {
            status: 502,
            body: "Bad gateway".to_string(),
        })]);
        assert!(matches!(
            resolve_user_id(&transport, "octocat").await,
            Err(Error::Status { status: 502, .. })
        ));
    }

    fn undated(number: u64, author: Option<&str>) -> UndatedIssue {
        UndatedIssue {
            issue: crate::IssueRef {
                owner: "acme".to_string(),
                repo: "widgets".to_string(),
                number,
                title: format!("Issue {}", number),
            },
            author_login: author.map(str::to_string),
            author_id: None,
        }
    }

    #[tokio::test]
    async fn test_author_ids_looked_up_once_per_login() {
        let transport = ScriptedTransport::new(|_, vars| {
            let login = vars.unwrap()["login"].as_str().unwrap().to_string();
            if login == "ghost" {
                return Ok(json!({ "data": { "user": null } }));
            }
            Ok(json!({ "data": { "user": { "id": format!("U_{}", login) } } }))
        });
        let mut issues = vec![
            undated(1, Some("alice")),
            undated(2, None),
            undated(3, Some("alice")),
            undated(4, Some("ghost")),
            undated(5, Some("ghost")),
        ];

        attach_author_ids(&transport, issues.iter_mut()).await.unwrap();

        let ids: Vec<Option<&str>> = issues.iter().map(|i| i.author_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("U_alice"), None, Some("U_alice"), None, None]);
        assert_eq!(transport.call_count(), 2);
    }

    /// Answers every labeling call; counts lookups by kind
    fn labeling_server(repository: Value, issue: Value, add_labels: Value) -> ScriptedTransport {
        ScriptedTransport::new(move |query, _| {
            if query.contains("addLabelsToLabelable") {
                Ok(add_labels.clone())
            } else if query.contains("createLabel") {
                Ok(json!({ "data": { "createLabel": { "label": { "id": "LA_1", "name": "Past Due" } } } }))
            } else if query.contains("label(name") {
                Ok(json!({ "data": { "organization": { "repository": { "label": null } } } }))
            } else if query.contains("issue(number") {
                Ok(json!({ "data": { "organization": { "repository": { "issue": issue.clone() } } } }))
            } else {
                Ok(json!({ "data": { "organization": { "repository": repository.clone() } } }))
            }
        })
    }

    fn count(transport: &ScriptedTransport, document: &str) -> usize {
        transport.calls().iter().filter(|(q, _)| q == document).count()
    }

    fn labeled() -> Value {
        json!({ "data": { "addLabelsToLabelable": { "labelable": { "labels": { "nodes": [{ "name": "Past Due" }] } } } } })
    }

    #[tokio::test]
    async fn test_labeler_resolves_ids_once_per_repository() {
        let transport = labeling_server(json!({ "id": "R_1" }), json!({ "id": "I_1" }), labeled());
        let mut labeler = IssueLabeler::new(&transport);

        for number in [1, 2, 3] {
            let outcome = labeler.label("acme", "widgets", number, &LabelSpec::PAST_DUE).await.unwrap();
            assert_eq!(outcome, LabelOutcome::Labeled);
        }

        assert_eq!(count(&transport, REPOSITORY_ID_QUERY), 1);
        assert_eq!(count(&transport, ISSUE_ID_QUERY), 3);
        assert_eq!(count(&transport, LABEL_QUERY), 1);
        assert_eq!(count(&transport, CREATE_LABEL_MUTATION), 1);
        assert_eq!(count(&transport, ADD_LABELS_MUTATION), 3);
    }

    #[tokio::test]
    async fn test_labeler_skips_unresolved_repository() {
        let transport = labeling_server(Value::Null, json!({ "id": "I_1" }), labeled());
        let mut labeler = IssueLabeler::new(&transport);

        let first = labeler.label("acme", "gone", 1, &LabelSpec::PAST_DUE).await.unwrap();
        let second = labeler.label("acme", "gone", 2, &LabelSpec::PAST_DUE).await.unwrap();
        assert_eq!(first, LabelOutcome::Skipped);
        assert_eq!(second, LabelOutcome::Skipped);

        // the missing repository is remembered, nothing else is attempted
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_labeler_skips_unresolved_issue() {
        let transport = labeling_server(json!({ "id": "R_1" }), Value::Null, labeled());
        let mut labeler = IssueLabeler::new(&transport);

        let outcome = labeler.label("acme", "widgets", 404, &LabelSpec::PAST_DUE).await.unwrap();
        assert_eq!(outcome, LabelOutcome::Skipped);
        assert_eq!(count(&transport, CREATE_LABEL_MUTATION), 0);
        assert_eq!(count(&transport, ADD_LABELS_MUTATION), 0);
    }

    #[tokio::test]
    async fn test_labeler_reports_rejected_mutation() {
        let rejected = json!({ "errors": [{ "message": "Resource not accessible by integration" }] });
        let transport = labeling_server(json!({ "id": "R_1" }), json!({ "id": "I_1" }), rejected);
        let mut labeler = IssueLabeler::new(&transport);

        let outcome = labeler.label("acme", "widgets", 1, &LabelSpec::PAST_DUE).await.unwrap();
        assert_eq!(outcome, LabelOutcome::Rejected);
    }
}
