//! MCP tool implementations
//!
//! Tool bodies live here as plain async functions; `McpServer` only routes
//! MCP calls to them. Each module handles one concern.

pub mod graphql;
pub mod schema;

#[cfg(test)]
mod schema_test;

use rmcp::{ErrorData as McpError, model::*};
use serde_json::{Value, json};

use crate::config::Provider;
use crate::graphql::{GraphqlError, OperationKind, Schema};

pub use graphql::{MutateParams, QueryParams};
pub use schema::DescribeTypeParams;

pub const QUERY_TOOL: &str = "graphql_query";
pub const MUTATE_TOOL: &str = "graphql_mutate";
pub const DESCRIBE_TOOL: &str = "graphql_describe_type";

/// Tool descriptions enriched with the schema's root operations.
pub fn tool_descriptions(
    provider: Provider,
    endpoint: &str,
    schema: &Schema,
    summary_limit: usize,
) -> Vec<(&'static str, String)> {
    let api = provider.display_name();

    let mut query = format!(
        "Execute a read-only GraphQL query against the {api} API ({endpoint}). \
         Pass the complete query document in 'query', optional JSON 'variables', and \
         'operationName' when the document defines several operations. \
         Mutations are rejected here; use {MUTATE_TOOL}. \
         Use {DESCRIBE_TOOL} to look up the fields of a type."
    );
    if let Some(summary) = schema.summary(OperationKind::Query, summary_limit) {
        query.push_str("\n\n");
        query.push_str(&summary);
    }

    let mut mutate = format!(
        "Execute a GraphQL mutation against the {api} API ({endpoint}). \
         Pass the complete mutation document in 'mutation' and optional JSON 'variables'. \
         Only mutation operations are accepted; use {QUERY_TOOL} for reads."
    );
    match schema.summary(OperationKind::Mutation, summary_limit) {
        Some(summary) => {
            mutate.push_str("\n\n");
            mutate.push_str(&summary);
        }
        None => mutate.push_str("\n\nThe schema defines no mutations."),
    }

    let describe = format!(
        "Describe a type from the {api} GraphQL schema ({} types) in SDL form: fields with \
         arguments and return types, input fields, enum values, or union members.",
        schema.types.len()
    );

    vec![
        (QUERY_TOOL, query),
        (MUTATE_TOOL, mutate),
        (DESCRIBE_TOOL, describe),
    ]
}

/// Map GraphqlError to McpError.
pub fn map_graphql_error(err: GraphqlError) -> McpError {
    match err {
        GraphqlError::Unauthorized { .. } => McpError::invalid_request(
            "unauthorized",
            Some(json!({
                "error": err.to_string(),
            })),
        ),
        _ => McpError::internal_error(
            "upstream_error",
            Some(json!({
                "error": err.to_string(),
            })),
        ),
    }
}

/// Pretty JSON tool result.
pub(crate) fn json_result(value: &Value, is_error: bool) -> Result<CallToolResult, McpError> {
    let content_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({"error": e.to_string()})),
        )
    })?;

    let content = vec![Content::text(content_str)];
    Ok(if is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    })
}
