//! Tests for MCP Streamable HTTP service integration

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use super::server::ServerOptions;
use crate::config::Provider;
use crate::graphql::MockUpstream;
use crate::test_support::sample_schema;

fn service() -> StreamableHttpService<super::McpServer<MockUpstream>, LocalSessionManager> {
    let mut upstream = MockUpstream::new();
    upstream
        .expect_endpoint()
        .return_const("https://gitlab.example.com/api/graphql".to_string());

    super::create_mcp_service(
        Arc::new(upstream),
        Arc::new(sample_schema()),
        ServerOptions {
            provider: Provider::Gitlab,
            read_only: false,
            summary_limit: 10,
        },
        CancellationToken::new(),
    )
}

/// Test that MCP service can be integrated with Axum router
#[tokio::test]
async fn test_mcp_service_with_router() {
    let app = Router::new().nest_service("/mcp", service());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Root path should return 404 (only /mcp is mounted)
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test that the service answers on its mount point
///
/// rmcp returns protocol errors for requests without a session, but the
/// route itself must be reachable.
#[tokio::test]
async fn test_mcp_session_management_configured() {
    let app = Router::new().nest_service("/mcp", service());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/mcp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Service should be mounted and responding"
    );
}
