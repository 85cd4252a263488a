//! In-memory GraphQL transport and JSON builders for unit tests

use crate::graphql::GraphQLTransport;
use crate::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str, Option<&Value>) -> Result<Value> + Send + Sync>;

/// Transport answering from a closure and recording every call
pub(crate) struct ScriptedTransport {
    responder: Responder,
    calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        responder: impl Fn(&str, Option<&Value>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer calls in order from a fixed list of replies
    pub(crate) fn from_replies(replies: Vec<Result<Value>>) -> Self {
        let queue = Mutex::new(VecDeque::from(replies));
        Self::new(move |_, _| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more times than scripted")
        })
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQLTransport for ScriptedTransport {
    async fn execute(&self, query: &str, variables: Option<&Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), variables.cloned()));
        (self.responder)(query, variables)
    }
}

/// A board item backed by an issue in `acme/widgets`
pub(crate) fn issue_item(number: u64, labels: &[&str], fields: Vec<Value>) -> Value {
    let labels: Vec<Value> = labels.iter().map(|l| json!({ "name": l })).collect();
    json!({
        "id": format!("PVTI_{number}"),
        "content": {
            "title": format!("Issue {number}"),
            "number": number,
            "repository": { "nameWithOwner": "acme/widgets" },
            "author": { "login": "octocat" },
            "labels": { "totalCount": labels.len(), "nodes": labels }
        },
        "fieldValues": { "totalCount": fields.len(), "nodes": fields }
    })
}

pub(crate) fn date_field(name: &str, date: &str) -> Value {
    json!({ "date": date, "field": { "name": name } })
}

pub(crate) fn select_field(name: &str, value: &str) -> Value {
    json!({ "name": value, "field": { "name": name } })
}

/// One page of the project items query
pub(crate) fn items_page(items: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "organization": {
                "projectV2": {
                    "id": "PVT_1",
                    "title": "Roadmap",
                    "items": {
                        "pageInfo": {
                            "hasNextPage": next_cursor.is_some(),
                            "endCursor": next_cursor
                        },
                        "nodes": items
                    }
                }
            }
        }
    })
}
