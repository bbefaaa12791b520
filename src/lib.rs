//! MCP server that exposes a GraphQL API to LLM clients.
//!
//! On startup the upstream schema is introspected (or read from the on-disk
//! cache) and summarised into the descriptions of generic query and mutation
//! tools that forward client-written documents to the upstream.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod graphql;
pub mod mcp;
mod paths;

#[cfg(test)]
mod test_support;
