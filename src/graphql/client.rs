//! HTTP client for the upstream GraphQL API.
//!
//! The [`Upstream`] trait is the seam between the MCP tools and the network;
//! tests substitute `MockUpstream`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

#[cfg(test)]
use mockall::automock;

use super::error::{GraphqlError, GraphqlResult};
use crate::config::{Auth, UpstreamConfig};

const MAX_ERROR_BODY: usize = 2000;

/// A GraphQL-over-HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    pub fn with_variables(mut self, variables: Option<Map<String, Value>>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_operation_name(mut self, operation_name: Option<String>) -> Self {
        self.operation_name = operation_name;
        self
    }
}

/// A GraphQL response body. `errors` entries are kept verbatim.
///
/// `data` distinguishes an absent key (`None`, the request failed before
/// execution) from an explicit `null` (`Some(Value::Null)`, execution failed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlResponse {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Errors without any data: the operation failed as a whole.
    pub fn is_failure(&self) -> bool {
        self.has_errors() && self.data.as_ref().is_none_or(Value::is_null)
    }

    /// The `message` of each error, for logs and error reports.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| match e.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => e.to_string(),
            })
            .collect()
    }
}

// Only called when the key is present, so a JSON null stays `Some(Value::Null)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// An upstream GraphQL API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Upstream: Send + Sync {
    /// The endpoint URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Execute a GraphQL request.
    async fn execute(&self, request: &GraphqlRequest) -> GraphqlResult<GraphqlResponse>;
}

impl Auth {
    /// Header name and value carrying these credentials.
    pub fn header(&self) -> Option<(String, String)> {
        match self {
            Auth::None => None,
            Auth::Bearer(token) => Some(("Authorization".to_string(), format!("Bearer {token}"))),
            Auth::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                Some(("Authorization".to_string(), format!("Basic {encoded}")))
            }
            Auth::Header { name, value } => Some((name.clone(), value.clone())),
        }
    }
}

/// [`Upstream`] over HTTP POST with JSON bodies.
pub struct HttpUpstream {
    endpoint: String,
    auth: Option<(String, String)>,
    client: Client,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> GraphqlResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GraphqlError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            auth: config.auth.header(),
            client,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint, operation = ?request.operation_name))]
    async fn execute(&self, request: &GraphqlRequest) -> GraphqlResult<GraphqlResponse> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some((name, value)) = &self.auth {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|source| GraphqlError::ConnectionFailed {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphqlError::InvalidResponse {
                message: e.to_string(),
            })?;
        debug!(status = status.as_u16(), bytes = body.len(), "upstream responded");

        parse_response(status, &body)
    }
}

/// Interpret an upstream HTTP response.
///
/// GraphQL servers often report request errors with a 4xx status and a
/// regular GraphQL body; those are passed through as responses.
pub(crate) fn parse_response(status: StatusCode, body: &str) -> GraphqlResult<GraphqlResponse> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GraphqlError::Unauthorized {
            status: status.as_u16(),
        });
    }

    match serde_json::from_str::<GraphqlResponse>(body) {
        Ok(parsed) if parsed.data.is_some() || parsed.errors.is_some() => Ok(parsed),
        Ok(_) if status.is_success() => Err(GraphqlError::InvalidResponse {
            message: "response has neither data nor errors".to_string(),
        }),
        Err(e) if status.is_success() => Err(e.into()),
        _ => Err(GraphqlError::UpstreamStatus {
            status: status.as_u16(),
            body: truncate(body, MAX_ERROR_BODY),
        }),
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
