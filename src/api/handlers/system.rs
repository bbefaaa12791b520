//! System health and status handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::api::state::AppState;
use crate::graphql::{OperationKind, Upstream};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    pub provider: String,
    pub endpoint: String,
    /// Non-deprecated root query fields in the loaded schema
    pub query_fields: usize,
    /// Non-deprecated root mutation fields in the loaded schema
    pub mutation_fields: usize,
}

/// Health check endpoint
///
/// Reports the upstream being proxied and the size of the loaded schema.
#[instrument(skip(state))]
pub async fn health<U: Upstream + 'static>(State(state): State<AppState<U>>) -> Json<HealthResponse> {
    let schema = state.schema();
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.options().provider.to_string(),
        endpoint: state.upstream().endpoint().to_string(),
        query_fields: schema.root_fields(OperationKind::Query).len(),
        mutation_fields: schema.root_fields(OperationKind::Mutation).len(),
    })
}
