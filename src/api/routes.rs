//! HTTP route configuration.

use axum::Router;
use axum::routing::get;
use tokio_util::sync::CancellationToken;

use super::handlers;
use super::state::AppState;
use crate::graphql::Upstream;
use crate::mcp::create_mcp_service;

/// Create the host router: `/health` plus the MCP service under `/mcp`.
pub fn create_router<U: Upstream + 'static>(
    state: AppState<U>,
    cancellation_token: CancellationToken,
) -> Router {
    let mcp_service = create_mcp_service(
        state.upstream_arc(),
        state.schema_arc(),
        state.options().clone(),
        cancellation_token,
    );

    Router::new()
        .route("/health", get(handlers::health::<U>))
        .with_state(state)
        .nest_service("/mcp", mcp_service)
}
