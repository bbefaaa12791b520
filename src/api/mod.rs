//! Process host: tracing setup, schema loading, and the stdio or HTTP
//! transport loop.

mod handlers;
mod routes;
mod state;


use std::net::SocketAddr;
use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use handlers::HealthResponse;
pub use routes::create_router;
pub use state::AppState;

use crate::config::{Config, Transport};
use crate::error::ProxyError;
use crate::graphql::{HttpUpstream, Schema, SchemaCache, Upstream};
use crate::mcp::{McpServer, ServerOptions};

/// Initialize tracing subscriber with env filter
///
/// Output goes to stderr; stdout belongs to the stdio transport.
fn init_tracing(transport: Transport) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gql_mcp=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(transport == Transport::Http),
        )
        .try_init();
}

/// Run the proxy with the given configuration
pub async fn run(config: Config) -> Result<(), ProxyError> {
    init_tracing(config.transport);
    config.validate()?;

    let upstream = Arc::new(HttpUpstream::new(&config.upstream)?);
    let cache = SchemaCache::new(config.cache_dir.clone(), config.cache_ttl);
    let (schema, source) = cache.load_or_fetch(upstream.as_ref()).await?;
    info!(
        provider = %config.provider,
        endpoint = upstream.endpoint(),
        ?source,
        types = schema.types.len(),
        "schema loaded"
    );

    let schema = Arc::new(schema);
    let options = ServerOptions::from(&config);

    match config.transport {
        Transport::Stdio => serve_stdio(upstream, schema, options).await,
        Transport::Http => {
            let addr = SocketAddr::new(config.host, config.port);
            serve_http(addr, AppState::new(upstream, schema, options)).await
        }
    }
}

async fn serve_stdio<U: Upstream + 'static>(
    upstream: Arc<U>,
    schema: Arc<Schema>,
    options: ServerOptions,
) -> Result<(), ProxyError> {
    let service = McpServer::new(upstream, schema, options)
        .serve(stdio())
        .await
        .map_err(|e| ProxyError::Transport {
            message: e.to_string(),
        })?;
    info!("MCP server running on stdio");

    let reason = service.waiting().await.map_err(|e| ProxyError::Transport {
        message: e.to_string(),
    })?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

async fn serve_http<U: Upstream + 'static>(
    addr: SocketAddr,
    state: AppState<U>,
) -> Result<(), ProxyError> {
    let cancellation_token = CancellationToken::new();
    let app = routes::create_router(state, cancellation_token.clone())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
            }
            info!("shutting down");
            cancellation_token.cancel();
        })
        .await?;
    Ok(())
}
