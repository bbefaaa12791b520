//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::graphql::{Schema, Upstream};

use super::server::{McpServer, ServerOptions};

/// Create MCP Streamable HTTP service
///
/// This function creates a StreamableHttpService that can be nested into an Axum router.
///
/// # Arguments
/// * `upstream` - Upstream GraphQL API shared by all sessions
/// * `schema` - Introspected schema shared by all sessions
/// * `options` - Tool set options
/// * `cancellation_token` - Token for graceful shutdown
pub fn create_mcp_service<U: Upstream + 'static>(
    upstream: Arc<U>,
    schema: Arc<Schema>,
    options: ServerOptions,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<U>, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer<U>, std::io::Error> {
        Ok(McpServer::new(
            Arc::clone(&upstream),
            Arc::clone(&schema),
            options.clone(),
        ))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true; // Enable session management
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
