//! MCP server implementation
//!
//! Routes MCP tool calls to the handlers in [`super::tools`] and advertises
//! tool descriptions built from the introspected schema.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use tracing::debug;

use crate::config::{Config, Provider};
use crate::graphql::{OperationKind, Schema, Upstream};

use super::tools::{
    self, DescribeTypeParams, MUTATE_TOOL, MutateParams, QueryParams, tool_descriptions,
};

/// Settings that shape the advertised tool set.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub provider: Provider,
    pub read_only: bool,
    pub summary_limit: usize,
}

impl From<&Config> for ServerOptions {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.provider,
            read_only: config.read_only,
            summary_limit: config.summary_limit,
        }
    }
}

/// Main MCP server
///
/// Generic over `U: Upstream` so tests can swap in a mock upstream.
/// The upstream and schema are shared between sessions.
pub struct McpServer<U: Upstream> {
    upstream: Arc<U>,
    schema: Arc<Schema>,
    options: ServerOptions,
    tool_router: ToolRouter<Self>,
}

// Manual Clone impl - only the Arcs are cloned, U need not be Clone
impl<U: Upstream + 'static> Clone for McpServer<U> {
    fn clone(&self) -> Self {
        Self::new(
            Arc::clone(&self.upstream),
            Arc::clone(&self.schema),
            self.options.clone(),
        )
    }
}

#[tool_router]
impl<U: Upstream + 'static> McpServer<U> {
    /// Create a new MCP server for `upstream` described by `schema`
    pub fn new(upstream: Arc<U>, schema: Arc<Schema>, options: ServerOptions) -> Self {
        let mut tool_router = Self::tool_router();

        if options.read_only {
            tool_router.remove_route(MUTATE_TOOL);
        }

        for (name, description) in tool_descriptions(
            options.provider,
            upstream.endpoint(),
            &schema,
            options.summary_limit,
        ) {
            if let Some(route) = tool_router.map.get_mut(name) {
                route.attr.description = Some(description.into());
            }
        }
        debug!(read_only = options.read_only, "tool router built");

        Self {
            upstream,
            schema,
            options,
            tool_router,
        }
    }

    /// Tools advertised to clients.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    #[tool(description = "Execute a read-only GraphQL query against the upstream API")]
    pub async fn graphql_query(
        &self,
        params: Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::graphql::query(&*self.upstream, params.0).await
    }

    #[tool(description = "Execute a GraphQL mutation against the upstream API")]
    pub async fn graphql_mutate(
        &self,
        params: Parameters<MutateParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::graphql::mutate(&*self.upstream, params.0).await
    }

    #[tool(description = "Describe a type from the upstream GraphQL schema")]
    pub async fn graphql_describe_type(
        &self,
        params: Parameters<DescribeTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::schema::describe_type(&self.schema, params.0)
    }

    fn instructions(&self) -> String {
        let count = |kind| self.schema.root_fields(kind).len();
        let mut text = format!(
            "GraphQL proxy for the {} API at {}. The schema exposes {} root query fields and {} root mutation fields. \
             Use graphql_query for reads, graphql_describe_type to explore types",
            self.options.provider.display_name(),
            self.upstream.endpoint(),
            count(OperationKind::Query),
            count(OperationKind::Mutation),
        );
        if self.options.read_only {
            text.push_str(". Mutations are disabled (read-only mode).");
        } else {
            text.push_str(", and graphql_mutate for writes.");
        }
        text
    }
}

#[tool_handler]
impl<U: Upstream + 'static> ServerHandler for McpServer<U> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(Implementation::new("gql-mcp", env!("CARGO_PKG_VERSION")))
            .with_instructions(self.instructions())
    }
}
