//! Query and mutation forwarding tools.

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use super::{json_result, map_graphql_error};
use crate::graphql::{GraphqlRequest, OperationKind, Upstream, classify};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[schemars(description = "GraphQL query document, e.g. 'query { currentUser { username } }'")]
    pub query: String,
    #[schemars(description = "Variables for the query as a JSON object (optional)")]
    pub variables: Option<Map<String, Value>>,
    #[schemars(
        description = "Operation to run when the document defines several operations (optional)"
    )]
    pub operation_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutateParams {
    #[schemars(description = "GraphQL mutation document, e.g. 'mutation { ... }'")]
    pub mutation: String,
    #[schemars(description = "Variables for the mutation as a JSON object (optional)")]
    pub variables: Option<Map<String, Value>>,
    #[schemars(
        description = "Operation to run when the document defines several operations (optional)"
    )]
    pub operation_name: Option<String>,
}

impl From<QueryParams> for GraphqlRequest {
    fn from(params: QueryParams) -> Self {
        GraphqlRequest::new(params.query)
            .with_variables(params.variables)
            .with_operation_name(params.operation_name)
    }
}

impl From<MutateParams> for GraphqlRequest {
    fn from(params: MutateParams) -> Self {
        GraphqlRequest::new(params.mutation)
            .with_variables(params.variables)
            .with_operation_name(params.operation_name)
    }
}

/// Forward a read-only query.
pub async fn query<U: Upstream + ?Sized>(
    upstream: &U,
    params: QueryParams,
) -> Result<CallToolResult, McpError> {
    forward(upstream, OperationKind::Query, params.into()).await
}

/// Forward a mutation.
pub async fn mutate<U: Upstream + ?Sized>(
    upstream: &U,
    params: MutateParams,
) -> Result<CallToolResult, McpError> {
    forward(upstream, OperationKind::Mutation, params.into()).await
}

/// Check the document's operation type and send it upstream.
#[instrument(skip_all, fields(expected = %expected, operation = ?request.operation_name))]
async fn forward<U: Upstream + ?Sized>(
    upstream: &U,
    expected: OperationKind,
    request: GraphqlRequest,
) -> Result<CallToolResult, McpError> {
    let kind = classify(&request.query, request.operation_name.as_deref()).map_err(|e| {
        McpError::invalid_params(
            "invalid_document",
            Some(json!({
                "error": e.to_string(),
            })),
        )
    })?;

    check_operation_kind(expected, kind)?;

    let response = upstream
        .execute(&request)
        .await
        .map_err(map_graphql_error)?;

    if response.has_errors() {
        warn!(errors = ?response.error_messages(), "upstream reported GraphQL errors");
    } else {
        info!("operation forwarded");
    }

    let value = serde_json::to_value(&response).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({"error": e.to_string()})),
        )
    })?;

    json_result(&value, response.is_failure())
}

fn check_operation_kind(expected: OperationKind, actual: OperationKind) -> Result<(), McpError> {
    match (expected, actual) {
        (expected, actual) if expected == actual => Ok(()),
        (_, OperationKind::Subscription) => Err(McpError::invalid_params(
            "subscription_not_supported",
            Some(json!({
                "error": "Subscriptions cannot be forwarded; send a query or mutation instead.",
            })),
        )),
        (OperationKind::Query, OperationKind::Mutation) => Err(McpError::invalid_params(
            "mutation_not_allowed",
            Some(json!({
                "error": "This tool only runs queries. Use graphql_mutate for mutations.",
            })),
        )),
        (_, actual) => Err(McpError::invalid_params(
            "not_a_mutation",
            Some(json!({
                "error": format!(
                    "Expected a mutation but the document is a {actual}. Use graphql_query for reads."
                ),
            })),
        )),
    }
}
