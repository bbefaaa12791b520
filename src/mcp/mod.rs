//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the upstream GraphQL API through three tools:
//!
//! - `graphql_query`: forward a read-only query document
//! - `graphql_mutate`: forward a mutation document (hidden in read-only mode)
//! - `graphql_describe_type`: render a type from the cached schema
//!
//! Tool descriptions carry a summary of the schema's root operations so
//! clients can write documents without a separate discovery round-trip.
//! The server speaks stdio or Streamable HTTP (see [`create_mcp_service`]).

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod server_test;
#[cfg(test)]
mod service_test;

pub use server::{McpServer, ServerOptions};
pub use service::create_mcp_service;
