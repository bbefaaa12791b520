//! Operation-type detection for client-supplied GraphQL documents.

use std::fmt;

use async_graphql_parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use serde::Serialize;

use super::error::DocumentError;

/// Root operation type of a GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl From<OperationType> for OperationKind {
    fn from(ty: OperationType) -> Self {
        match ty {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        };
        f.write_str(name)
    }
}

/// Determine which operation `document` executes.
///
/// Mirrors GraphQL operation selection: with `operation_name` the named
/// operation is chosen, without it the document must hold exactly one.
pub fn classify(
    document: &str,
    operation_name: Option<&str>,
) -> Result<OperationKind, DocumentError> {
    let doc = parse_query(document).map_err(|e| DocumentError::Syntax {
        message: e.to_string(),
    })?;

    match (&doc.operations, operation_name) {
        (DocumentOperations::Single(op), None) => Ok(op.node.ty.into()),
        (DocumentOperations::Multiple(ops), None) => match ops.len() {
            0 => Err(DocumentError::NoOperations),
            1 => ops
                .values()
                .next()
                .map(|op| op.node.ty.into())
                .ok_or(DocumentError::NoOperations),
            count => Err(DocumentError::OperationNameRequired { count }),
        },
        (operations, Some(name)) => operations
            .iter()
            .find(|(op_name, _)| op_name.is_some_and(|n| n.as_str() == name))
            .map(|(_, op)| op.node.ty.into())
            .ok_or_else(|| DocumentError::UnknownOperation {
                name: name.to_string(),
            }),
    }
}
