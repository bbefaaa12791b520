//! Top-level error type for running the proxy.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::graphql::GraphqlError;

#[derive(Error, Diagnostic, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graphql(#[from] GraphqlError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(gql_mcp::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(gql_mcp::transport))]
    Transport { message: String },
}
