//! Configuration error types.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No GraphQL endpoint configured for provider '{provider}'")]
    #[diagnostic(
        code(gql_mcp::config::missing_endpoint),
        help("Pass --endpoint or set GQL_MCP_ENDPOINT (atlassian: set ATLASSIAN_SITE).")
    )]
    MissingEndpoint { provider: String },

    #[error("Invalid GraphQL endpoint '{endpoint}'")]
    #[diagnostic(
        code(gql_mcp::config::invalid_endpoint),
        help("The endpoint must be an absolute http:// or https:// URL.")
    )]
    InvalidEndpoint { endpoint: String },

    #[error("Missing credentials for provider '{provider}'")]
    #[diagnostic(code(gql_mcp::config::missing_credentials), help("Set {variables}."))]
    MissingCredentials { provider: String, variables: String },

    #[error("Invalid value for {name}: '{value}'")]
    #[diagnostic(code(gql_mcp::config::invalid_value))]
    InvalidValue { name: String, value: String },

    #[error("Summary limit must be at least 1")]
    #[diagnostic(code(gql_mcp::config::summary_limit))]
    InvalidSummaryLimit,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
