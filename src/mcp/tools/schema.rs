//! Schema lookup tool.

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::graphql::Schema;

const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTypeParams {
    #[schemars(description = "Type name, e.g. 'Project' or 'CreateIssueInput'")]
    pub name: String,
}

/// Render one type from the cached schema.
pub fn describe_type(
    schema: &Schema,
    params: DescribeTypeParams,
) -> Result<CallToolResult, McpError> {
    let name = params.name.trim();

    match schema.describe_type(name) {
        Some(sdl) => Ok(CallToolResult::success(vec![Content::text(sdl)])),
        None => Err(McpError::resource_not_found(
            "type_not_found",
            Some(json!({
                "error": format!("No type named '{name}' in schema"),
                "suggestions": suggest_types(schema, name),
            })),
        )),
    }
}

/// Type names containing `name`, ignoring case and introspection types.
fn suggest_types<'a>(schema: &'a Schema, name: &str) -> Vec<&'a str> {
    let needle = name.to_ascii_lowercase();
    let mut names: Vec<&str> = schema
        .types
        .iter()
        .filter_map(|t| t.name.as_deref())
        .filter(|n| !n.starts_with("__"))
        .filter(|n| !needle.is_empty() && n.to_ascii_lowercase().contains(&needle))
        .collect();
    names.sort_unstable();
    names.truncate(MAX_SUGGESTIONS);
    names
}
