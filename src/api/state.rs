//! Application state for the HTTP host.

use std::sync::Arc;

use crate::graphql::{Schema, Upstream};
use crate::mcp::ServerOptions;

/// Shared application state.
///
/// Generic over `U: Upstream` so router tests can run against a mock upstream.
/// The upstream and schema are the same instances the MCP sessions use.
pub struct AppState<U: Upstream> {
    upstream: Arc<U>,
    schema: Arc<Schema>,
    options: ServerOptions,
}

// Manual Clone impl - we only need the Arcs to be cloneable, not U
impl<U: Upstream> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            schema: Arc::clone(&self.schema),
            options: self.options.clone(),
        }
    }
}

impl<U: Upstream> AppState<U> {
    pub fn new(upstream: Arc<U>, schema: Arc<Schema>, options: ServerOptions) -> Self {
        Self {
            upstream,
            schema,
            options,
        }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Get a cloned Arc to the upstream, for handing to the MCP service.
    pub fn upstream_arc(&self) -> Arc<U> {
        Arc::clone(&self.upstream)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_arc(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }
}
