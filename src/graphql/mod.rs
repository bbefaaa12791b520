//! GraphQL plumbing: upstream client, introspection, schema cache, and
//! operation classification.

mod cache;
mod client;
mod document;
mod error;
mod schema;


pub use cache::{CachedSchema, SchemaCache, SchemaSource};
#[cfg(test)]
pub use client::MockUpstream;
pub use client::{GraphqlRequest, GraphqlResponse, HttpUpstream, Upstream};
pub use document::{OperationKind, classify};
pub use error::{DocumentError, GraphqlError, GraphqlResult};
pub use schema::{
    EnumValue, Field, FullType, INTROSPECTION_QUERY, InputValue, NamedType, Schema, TypeRef,
    introspect,
};
