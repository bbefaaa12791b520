//! GraphQL upstream error types.

use miette::Diagnostic;
use thiserror::Error;

/// Errors talking to the upstream GraphQL API.
#[derive(Error, Diagnostic, Debug)]
pub enum GraphqlError {
    #[error("Failed to reach GraphQL endpoint {endpoint}")]
    #[diagnostic(
        code(gql_mcp::graphql::connection_failed),
        help("Check the endpoint URL and your network connection.")
    )]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(code(gql_mcp::graphql::client))]
    Client { message: String },

    #[error("Upstream rejected the credentials ({status})")]
    #[diagnostic(
        code(gql_mcp::graphql::unauthorized),
        help("Check the API token for this provider and its scopes.")
    )]
    Unauthorized { status: u16 },

    #[error("Upstream returned HTTP {status}: {body}")]
    #[diagnostic(code(gql_mcp::graphql::upstream_status))]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid response from upstream: {message}")]
    #[diagnostic(code(gql_mcp::graphql::invalid_response))]
    InvalidResponse { message: String },

    #[error("Schema introspection failed: {message}")]
    #[diagnostic(
        code(gql_mcp::graphql::introspection),
        help("Some APIs disable introspection for anonymous users; try supplying a token.")
    )]
    Introspection { message: String },

    #[error("Schema cache error: {message}")]
    #[diagnostic(code(gql_mcp::graphql::cache))]
    Cache { message: String },
}

impl From<serde_json::Error> for GraphqlError {
    fn from(e: serde_json::Error) -> Self {
        GraphqlError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

/// Errors inspecting a client-supplied GraphQL document.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("GraphQL syntax error: {message}")]
    #[diagnostic(code(gql_mcp::document::syntax))]
    Syntax { message: String },

    #[error("Document contains no operations")]
    #[diagnostic(code(gql_mcp::document::empty))]
    NoOperations,

    #[error("Document contains {count} operations; operationName is required")]
    #[diagnostic(
        code(gql_mcp::document::ambiguous),
        help("Pass operationName to select one of the named operations.")
    )]
    OperationNameRequired { count: usize },

    #[error("No operation named '{name}' in document")]
    #[diagnostic(code(gql_mcp::document::unknown_operation))]
    UnknownOperation { name: String },
}

pub type GraphqlResult<T> = Result<T, GraphqlError>;
