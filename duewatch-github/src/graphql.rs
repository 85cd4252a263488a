//! GraphQL transport abstraction and response envelope handling

use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Something that can run a GraphQL document against GitHub
///
/// Implementations return the raw JSON envelope (`data` and/or `errors`)
/// and fail only on transport problems such as non-2xx responses.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: Option<&Value>) -> Result<Value>;
}

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

/// Decoded outcome of a GraphQL call that reached the server
#[derive(Debug)]
pub(crate) enum Reply<T> {
    /// `data` present and no `errors`
    Data(T),
    /// `errors` present or `data` missing; the joined messages
    Failed(String),
}

impl<T> Reply<T> {
    /// Treat a GraphQL-level failure as fatal
    pub(crate) fn into_result(self) -> Result<T> {
        match self {
            Reply::Data(data) => Ok(data),
            Reply::Failed(message) => Err(Error::GraphQL(message)),
        }
    }
}

/// Run a query and decode its `data` into `T`
///
/// Transport failures propagate. GraphQL-level failures come back as
/// [`Reply::Failed`] so each caller can apply its own policy.
pub(crate) async fn query<T: DeserializeOwned>(
    transport: &dyn GraphQLTransport,
    document: &str,
    variables: Value,
) -> Result<Reply<T>> {
    let raw = transport.execute(document, Some(&variables)).await?;
    decode(raw)
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<Reply<T>> {
    let response: GraphQLResponse = serde_json::from_value(raw)
        .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;

    if let Some(errors) = response.errors {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Ok(Reply::Failed(messages.join(", ")));
    }

    match response.data {
        None | Some(Value::Null) => Ok(Reply::Failed("GraphQL response missing data".to_string())),
        Some(data) => serde_json::from_value(data)
            .map(Reply::Data)
            .map_err(|e| Error::Parse(format!("Unexpected GraphQL data shape: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }

    #[derive(Debug, Deserialize)]
    struct ViewerData {
        viewer: Viewer,
    }

    #[test]
    fn test_decode_data() {
        let reply: Reply<ViewerData> = decode(json!({"data": {"viewer": {"login": "octo"}}})).unwrap();
        match reply {
            Reply::Data(data) => assert_eq!(data.viewer.login, "octo"),
            Reply::Failed(m) => panic!("unexpected failure: {m}"),
        }
    }

    #[test]
    fn test_errors_win_over_partial_data() {
        let raw = json!({
            "data": {"viewer": null},
            "errors": [{"message": "first"}, {"message": "second", "path": ["viewer"]}]
        });
        let reply: Reply<ViewerData> = decode(raw).unwrap();
        match reply {
            Reply::Failed(m) => assert_eq!(m, "first, second"),
            Reply::Data(_) => panic!("errors must not decode as data"),
        }
    }

    #[test]
    fn test_missing_data_is_failure() {
        let reply: Reply<ViewerData> = decode(json!({})).unwrap();
        assert!(matches!(reply, Reply::Failed(_)));

        let reply: Reply<ViewerData> = decode(json!({"data": null})).unwrap();
        assert!(matches!(reply, Reply::Failed(_)));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let result: Result<Reply<ViewerData>> = decode(json!({"data": {"viewer": 3}}));
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_into_result() {
        let failed: Reply<()> = Reply::Failed("boom".to_string());
        assert!(matches!(failed.into_result(), Err(Error::GraphQL(m)) if m == "boom"));
    }
}
