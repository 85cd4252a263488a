//! Paginated traversal of a Projects (v2) board
//!
//! [`ProjectItemIndex::fetch`] walks every page of a project's items and
//! keeps them in memory for the classifiers in [`crate::classify`].

use crate::graphql::{self, GraphQLTransport, Reply};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

/// Items requested per page
pub const ITEMS_PAGE_SIZE: u32 = 100;

/// Labels and field values returned per item; the API is not paginated
/// past this for either list.
pub const NESTED_PAGE_SIZE: u32 = 10;

const ITEMS_QUERY: &str = r#"
query($org: String!, $number: Int!, $pageSize: Int!, $nestedSize: Int!, $after: String) {
  organization(login: $org) {
    projectV2(number: $number) {
      id
      title
      items(first: $pageSize, after: $after) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          id
          content {
            ... on Issue {
              title
              number
              repository {
                nameWithOwner
              }
              author {
                login
              }
              labels(first: $nestedSize) {
                totalCount
                nodes {
                  name
                }
              }
            }
          }
          fieldValues(first: $nestedSize) {
            totalCount
            nodes {
              ... on ProjectV2ItemFieldDateValue {
                date
                field {
                  ... on ProjectV2FieldCommon {
                    name
                  }
                }
              }
              ... on ProjectV2ItemFieldSingleSelectValue {
                name
                field {
                  ... on ProjectV2FieldCommon {
                    name
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// One row of a project board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectItem {
    /// Opaque item node id
    pub id: String,
    /// Issue behind the item; `None` for drafts, pull requests and redacted items
    pub content: Option<IssueContent>,
    /// Date and single-select values, in API order
    pub field_values: Vec<FieldValue>,
}

/// The issue attached to a project item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueContent {
    pub title: Option<String>,
    pub number: Option<u64>,
    /// `owner/repo`
    pub repository_full_name: Option<String>,
    pub author_login: Option<String>,
    pub labels: Vec<String>,
}

impl IssueContent {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }
}

/// A custom field value on a project item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    /// Field name as configured on the board (unsanitized)
    pub field_name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldKind {
    /// `YYYY-MM-DD`, parsed only when a classifier needs it
    Date(String),
    /// Option display name
    SingleSelect(String),
}

impl FieldValue {
    pub fn date(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Date(d) => Some(d),
            FieldKind::SingleSelect(_) => None,
        }
    }

    pub fn select_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::SingleSelect(s) => Some(s),
            FieldKind::Date(_) => None,
        }
    }
}

/// Hook awaited before every page request
///
/// Returning an error aborts the fetch with that error.
#[async_trait]
pub trait PageHook: Send + Sync {
    async fn before_page(&self, page: usize) -> Result<()>;
}

/// All items of one project, fetched in a single pass
#[derive(Debug, Clone, Default)]
pub struct ProjectItemIndex {
    items: Vec<ProjectItem>,
    truncated: bool,
}

impl ProjectItemIndex {
    /// Build an index over already-fetched items
    pub fn from_items(items: Vec<ProjectItem>) -> Self {
        Self {
            items,
            truncated: false,
        }
    }

    /// Fetch every item of `org`'s project `project_number`
    ///
    /// A page answered with GraphQL errors, or without data, ends the walk:
    /// the items from earlier pages are returned and the index is marked
    /// truncated. Transport failures and hook errors propagate.
    pub async fn fetch(
        transport: &dyn GraphQLTransport,
        org: &str,
        project_number: u64,
        hook: Option<&dyn PageHook>,
    ) -> Result<Self> {
        let mut items = Vec::new();
        let mut after: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            if let Some(hook) = hook {
                hook.before_page(page).await?;
            }

            let variables = json!({
                "org": org,
                "number": project_number,
                "pageSize": ITEMS_PAGE_SIZE,
                "nestedSize": NESTED_PAGE_SIZE,
                "after": after,
            });

            let connection = match graphql::query::<ItemsData>(transport, ITEMS_QUERY, variables).await? {
                Reply::Data(ItemsData {
                    organization: Some(OrganizationNode {
                        project: Some(project),
                    }),
                }) => project.items,
                Reply::Data(_) => {
                    warn!(org, project_number, page, kept = items.len(), "Project not found; stopping pagination");
                    return Ok(Self::truncated(items));
                }
                Reply::Failed(message) => {
                    warn!(
                        org,
                        project_number,
                        page,
                        kept = items.len(),
                        error = %message,
                        "GraphQL error while paging project items; returning partial results"
                    );
                    return Ok(Self::truncated(items));
                }
            };

            let received = connection.nodes.len();
            items.extend(connection.nodes.into_iter().flatten().map(ProjectItem::from));
            debug!(page, received, total = items.len(), "Fetched project items page");

            if !connection.page_info.has_next_page {
                break;
            }
            match connection.page_info.end_cursor {
                Some(cursor) => after = Some(cursor),
                None => {
                    warn!(page, "hasNextPage without endCursor; treating as last page");
                    break;
                }
            }
        }

        info!(org, project_number, count = items.len(), pages = page, "Fetched all project items");
        Ok(Self::from_items(items))
    }

    fn truncated(items: Vec<ProjectItem>) -> Self {
        Self {
            items,
            truncated: true,
        }
    }

    pub fn items(&self) -> &[ProjectItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether pagination stopped early on a GraphQL error
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
struct OrganizationNode {
    #[serde(rename = "projectV2")]
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    items: ItemConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemConnection {
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Option<ItemNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemNode {
    id: String,
    content: Option<ContentNode>,
    field_values: Option<Connection<FieldValueNode>>,
}

#[derive(Debug, Deserialize)]
struct ContentNode {
    title: Option<String>,
    number: Option<u64>,
    repository: Option<RepositoryNode>,
    author: Option<AuthorNode>,
    labels: Option<Connection<LabelNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
struct Connection<T> {
    total_count: Option<u32>,
    #[serde(default)]
    nodes: Vec<Option<T>>,
}

impl<T> Connection<T> {
    /// Non-null nodes, warning when the server holds more than it returned
    fn into_nodes(self, what: &str, item_id: &str) -> Vec<T> {
        if let Some(total) = self.total_count {
            if total as usize > self.nodes.len() {
                warn!(item_id, what, total, returned = self.nodes.len(), "List truncated by page size");
            }
        }
        self.nodes.into_iter().flatten().collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    name_with_owner: String,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    login: String,
}

#[derive(Debug, Deserialize)]
struct LabelNode {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FieldValueNode {
    date: Option<String>,
    name: Option<String>,
    field: Option<FieldNode>,
}

#[derive(Debug, Deserialize)]
struct FieldNode {
    name: Option<String>,
}

impl From<ItemNode> for ProjectItem {
    fn from(node: ItemNode) -> Self {
        let id = node.id;
        let content = node.content.map(|c| IssueContent {
            title: c.title,
            number: c.number,
            repository_full_name: c.repository.map(|r| r.name_with_owner),
            author_login: c.author.map(|a| a.login),
            labels: c
                .labels
                .map(|l| l.into_nodes("labels", &id).into_iter().map(|n| n.name).collect())
                .unwrap_or_default(),
        });

        let field_values = node
            .field_values
            .map(|f| f.into_nodes("fieldValues", &id))
            .unwrap_or_default()
            .into_iter()
            .filter_map(FieldValue::from_node)
            .collect();

        ProjectItem {
            id,
            content,
            field_values,
        }
    }
}

impl FieldValue {
    /// Other field kinds arrive as `{}` and carry nothing to match on
    fn from_node(node: FieldValueNode) -> Option<Self> {
        let field_name = node.field.and_then(|f| f.name).unwrap_or_default();
        let kind = match (node.date, node.name) {
            (Some(date), _) => FieldKind::Date(date),
            (None, Some(name)) => FieldKind::SingleSelect(name),
            (None, None) => return None,
        };
        Some(FieldValue { field_name, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date_field, issue_item, items_page, select_field, ScriptedTransport};
    use crate::Error;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbered_items(range: std::ops::Range<u64>) -> Vec<Value> {
        range.map(|n| issue_item(n, &[], vec![])).collect()
    }

    fn numbers(index: &ProjectItemIndex) -> Vec<u64> {
        index
            .items()
            .iter()
            .map(|i| i.content.as_ref().and_then(|c| c.number).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_all_pages_in_order() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(items_page(numbered_items(0..100), Some("c1"))),
            Ok(items_page(numbered_items(100..200), Some("c2"))),
            Ok(items_page(numbered_items(200..250), None)),
        ]);

        let index = ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();

        assert_eq!(index.len(), 250);
        assert!(!index.is_truncated());
        assert_eq!(numbers(&index), (0..250).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_cursor_advances_between_pages() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(items_page(numbered_items(0..100), Some("cursor-1"))),
            Ok(items_page(numbered_items(100..101), None)),
        ]);

        ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        let first = calls[0].1.as_ref().unwrap();
        let second = calls[1].1.as_ref().unwrap();
        assert_eq!(first["after"], Value::Null);
        assert_eq!(first["org"], "acme");
        assert_eq!(first["number"], 7);
        assert_eq!(first["pageSize"], 100);
        assert_eq!(second["after"], "cursor-1");
    }

    #[tokio::test]
    async fn test_graphql_error_truncates_to_earlier_pages() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(items_page(numbered_items(0..100), Some("c1"))),
            Ok(items_page(numbered_items(100..200), Some("c2"))),
            Ok(serde_json::json!({ "errors": [{ "message": "something went wrong" }] })),
        ]);

        let index = ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();

        assert_eq!(index.len(), 200);
        assert!(index.is_truncated());
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_data_on_first_page_returns_empty() {
        let transport = ScriptedTransport::from_replies(vec![Ok(serde_json::json!({}))]);

        let index = ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();

        assert!(index.is_empty());
        assert!(index.is_truncated());
    }

    #[tokio::test]
    async fn test_http_failure_is_fatal() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(items_page(numbered_items(0..100), Some("c1"))),
            Err(Error::Status {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        ]);

        let result = ProjectItemIndex::fetch(&transport, "acme", 7, None).await;
        assert!(matches!(result, Err(Error::Status { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_next_page_without_cursor_stops() {
        let mut page = items_page(numbered_items(0..3), None);
        page["data"]["organization"]["projectV2"]["items"]["pageInfo"]["hasNextPage"] = Value::Bool(true);
        let transport = ScriptedTransport::from_replies(vec![Ok(page)]);

        let index = ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(transport.call_count(), 1);
    }

    struct CountingHook {
        pages: AtomicUsize,
        fail_on: usize,
    }

    #[async_trait]
    impl PageHook for CountingHook {
        async fn before_page(&self, page: usize) -> Result<()> {
            self.pages.fetch_add(1, Ordering::SeqCst);
            if page == self.fail_on {
                return Err(Error::RateLimited("2024-01-01T00:00:00Z".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_hook_runs_before_each_page() {
        let transport = ScriptedTransport::from_replies(vec![
            Ok(items_page(numbered_items(0..100), Some("c1"))),
            Ok(items_page(numbered_items(100..110), None)),
        ]);
        let hook = CountingHook {
            pages: AtomicUsize::new(0),
            fail_on: usize::MAX,
        };

        ProjectItemIndex::fetch(&transport, "acme", 7, Some(&hook)).await.unwrap();
        assert_eq!(hook.pages.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_hook_error_aborts_before_request() {
        let transport = ScriptedTransport::from_replies(vec![Ok(items_page(
            numbered_items(0..100),
            Some("c1"),
        ))]);
        let hook = CountingHook {
            pages: AtomicUsize::new(0),
            fail_on: 2,
        };

        let result = ProjectItemIndex::fetch(&transport, "acme", 7, Some(&hook)).await;
        assert!(matches!(result, Err(Error::RateLimited(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_decodes_content_and_fields() {
        let draft = serde_json::json!({
            "id": "PVTI_draft",
            "content": {},
            "fieldValues": { "totalCount": 1, "nodes": [{}] }
        });
        let transport = ScriptedTransport::from_replies(vec![Ok(items_page(
            vec![
                issue_item(
                    5,
                    &["bug", "Backlog"],
                    vec![
                        date_field("Due Date", "2024-03-01"),
                        select_field("Status", "In Progress"),
                        serde_json::json!({}),
                    ],
                ),
                draft,
                serde_json::json!({ "id": "PVTI_empty", "content": null, "fieldValues": null }),
            ],
            None,
        ))]);

        let index = ProjectItemIndex::fetch(&transport, "acme", 7, None).await.unwrap();
        let items = index.items();
        assert_eq!(items.len(), 3);

        let issue = items[0].content.as_ref().unwrap();
        assert_eq!(issue.title.as_deref(), Some("Issue 5"));
        assert_eq!(issue.repository_full_name.as_deref(), Some("acme/widgets"));
        assert_eq!(issue.author_login.as_deref(), Some("octocat"));
        assert!(issue.has_label("Backlog"));
        assert_eq!(items[0].field_values.len(), 2);
        assert_eq!(items[0].field_values[0].field_name, "Due Date");
        assert_eq!(items[0].field_values[0].date(), Some("2024-03-01"));
        assert_eq!(items[0].field_values[1].select_name(), Some("In Progress"));

        let draft = items[1].content.as_ref().unwrap();
        assert!(draft.title.is_none() && draft.number.is_none());
        assert!(items[1].field_values.is_empty());

        assert!(items[2].content.is_none());
    }
}
