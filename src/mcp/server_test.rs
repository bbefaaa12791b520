//! Tests for MCP server initialization and tool routing

use std::sync::Arc;

use rmcp::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use super::server::{McpServer, ServerOptions};
use super::tools::{DESCRIBE_TOOL, DescribeTypeParams, MUTATE_TOOL, QUERY_TOOL, QueryParams};
use crate::config::Provider;
use crate::graphql::{GraphqlResponse, MockUpstream};
use crate::test_support::sample_schema;

const ENDPOINT: &str = "https://gitlab.example.com/api/graphql";

fn mock_upstream() -> MockUpstream {
    let mut upstream = MockUpstream::new();
    upstream.expect_endpoint().return_const(ENDPOINT.to_string());
    upstream
}

fn options(read_only: bool) -> ServerOptions {
    ServerOptions {
        provider: Provider::Gitlab,
        read_only,
        summary_limit: 40,
    }
}

fn server_with(upstream: MockUpstream, read_only: bool) -> McpServer<MockUpstream> {
    McpServer::new(
        Arc::new(upstream),
        Arc::new(sample_schema()),
        options(read_only),
    )
}

fn tool_names(server: &McpServer<MockUpstream>) -> Vec<String> {
    let mut names: Vec<String> = server
        .tools()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();
    names
}

/// Test that MCP server implements ServerHandler trait
///
/// This test verifies:
/// - Server info includes correct capabilities (tools enabled)
/// - Instructions name the API and root field counts
#[tokio::test]
async fn test_server_info() {
    let server = server_with(mock_upstream(), false);

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert_eq!(info.server_info.name, "gql-mcp");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    let instructions = info.instructions.expect("Server should provide instructions");
    assert!(instructions.contains("GitLab API at https://gitlab.example.com/api/graphql"));
    assert!(instructions.contains("2 root query fields and 1 root mutation fields"));
    assert!(instructions.contains("graphql_mutate for writes"));
}

#[tokio::test]
async fn test_all_tools_registered() {
    let server = server_with(mock_upstream(), false);

    assert_eq!(
        tool_names(&server),
        vec![DESCRIBE_TOOL, MUTATE_TOOL, QUERY_TOOL]
    );
}

#[tokio::test]
async fn test_read_only_hides_mutate_tool() {
    let server = server_with(mock_upstream(), true);

    assert_eq!(tool_names(&server), vec![DESCRIBE_TOOL, QUERY_TOOL]);
    let instructions = server.get_info().instructions.unwrap();
    assert!(instructions.contains("read-only mode"));
}

#[tokio::test]
async fn test_tool_descriptions_enriched_with_schema_summary() {
    let server = server_with(mock_upstream(), false);

    let tools = server.tools();
    let description = |name: &str| {
        tools
            .iter()
            .find(|tool| tool.name == name)
            .and_then(|tool| tool.description.as_deref())
            .unwrap_or_default()
            .to_string()
    };

    let query = description(QUERY_TOOL);
    assert!(query.contains("Available root query fields (2):"));
    assert!(query.contains("- currentUser: UserCore"));

    let mutate = description(MUTATE_TOOL);
    assert!(mutate.contains("- createIssue(input: CreateIssueInput!): CreateIssuePayload"));

    assert!(description(DESCRIBE_TOOL).contains("(6 types)"));
}

#[tokio::test]
async fn test_query_tool_callable_via_server() {
    let mut upstream = mock_upstream();
    upstream.expect_execute().times(1).returning(|_| {
        Ok(GraphqlResponse {
            data: Some(json!({"currentUser": {"username": "root"}})),
            ..Default::default()
        })
    });
    let server = server_with(upstream, false);

    let result = server
        .graphql_query(Parameters(QueryParams {
            query: "{ currentUser { username } }".to_string(),
            variables: None,
            operation_name: None,
        }))
        .await;

    assert!(result.is_ok(), "graphql_query should be callable");
}

#[tokio::test]
async fn test_describe_tool_callable_via_server() {
    let server = server_with(mock_upstream(), false);

    let result = server
        .graphql_describe_type(Parameters(DescribeTypeParams {
            name: "IssueState".to_string(),
        }))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_clone_keeps_tool_set() {
    let server = server_with(mock_upstream(), true);

    let cloned = server.clone();

    assert_eq!(tool_names(&cloned), tool_names(&server));
}
