//! Schema introspection and summaries.
//!
//! The introspected schema is kept in its JSON shape (`__schema`) so it can be
//! cached verbatim. Summaries list root operations for tool descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::client::{GraphqlRequest, Upstream};
use super::document::OperationKind;
use super::error::{GraphqlError, GraphqlResult};

const MAX_DESCRIPTION: usize = 100;

/// Standard full introspection query.
pub const INTROSPECTION_QUERY: &str = r#"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types { ...FullType }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated
    deprecationReason
  }
  inputFields { ...InputValue }
  interfaces { ...TypeRef }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes { ...TypeRef }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType { kind name }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
}

/// `__schema` as returned by introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub query_type: Option<NamedType>,
    #[serde(default)]
    pub mutation_type: Option<NamedType>,
    #[serde(default)]
    pub subscription_type: Option<NamedType>,
    #[serde(default)]
    pub types: Vec<FullType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: String,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
}

/// Reference to a type, possibly wrapped in `NON_NULL`/`LIST`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind.as_str(), &self.of_type) {
            ("NON_NULL", Some(inner)) => write!(f, "{inner}!"),
            ("LIST", Some(inner)) => write!(f, "[{inner}]"),
            _ => f.write_str(self.name.as_deref().unwrap_or("?")),
        }
    }
}

impl Field {
    /// `name(arg: Type, ...): ReturnType`
    pub fn signature(&self) -> String {
        if self.args.is_empty() {
            format!("{}: {}", self.name, self.ty)
        } else {
            let args: Vec<String> = self.args.iter().map(InputValue::signature).collect();
            format!("{}({}): {}", self.name, args.join(", "), self.ty)
        }
    }
}

impl InputValue {
    /// `name: Type` with ` = default` when present.
    pub fn signature(&self) -> String {
        match &self.default_value {
            Some(default) => format!("{}: {} = {}", self.name, self.ty, default),
            None => format!("{}: {}", self.name, self.ty),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: Option<Schema>,
}

/// Fetch the schema from the upstream via introspection.
#[instrument(skip_all, fields(endpoint = upstream.endpoint()))]
pub async fn introspect<U: Upstream + ?Sized>(upstream: &U) -> GraphqlResult<Schema> {
    let response = upstream
        .execute(&GraphqlRequest::new(INTROSPECTION_QUERY))
        .await?;

    if response.is_failure() {
        return Err(GraphqlError::Introspection {
            message: response.error_messages().join("; "),
        });
    }

    let data = response.data.filter(|d| !d.is_null()).ok_or_else(|| GraphqlError::Introspection {
        message: "response contained no data".to_string(),
    })?;

    let schema = serde_json::from_value::<IntrospectionData>(data)?
        .schema
        .ok_or_else(|| GraphqlError::Introspection {
            message: "response contained no __schema".to_string(),
        })?;

    info!(types = schema.types.len(), "schema introspected");
    Ok(schema)
}

impl Schema {
    /// Root type for an operation kind, if the schema defines one.
    pub fn root_type(&self, kind: OperationKind) -> Option<&FullType> {
        let root = match kind {
            OperationKind::Query => self.query_type.as_ref(),
            OperationKind::Mutation => self.mutation_type.as_ref(),
            OperationKind::Subscription => self.subscription_type.as_ref(),
        }?;
        self.types
            .iter()
            .find(|t| t.name.as_deref() == Some(root.name.as_str()))
    }

    /// Non-deprecated root fields for an operation kind, sorted by name.
    pub fn root_fields(&self, kind: OperationKind) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self
            .root_type(kind)
            .and_then(|t| t.fields.as_ref())
            .map(|fields| fields.iter().filter(|f| !f.is_deprecated).collect())
            .unwrap_or_default();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    /// Look up a type by name, falling back to a case-insensitive match.
    pub fn find_type(&self, name: &str) -> Option<&FullType> {
        self.types
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
            .or_else(|| {
                self.types.iter().find(|t| {
                    t.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
            })
    }

    /// List root operations of `kind` for a tool description.
    ///
    /// Returns `None` when the schema has no root type for `kind`.
    pub fn summary(&self, kind: OperationKind, limit: usize) -> Option<String> {
        self.root_type(kind)?;
        let fields = self.root_fields(kind);

        let mut out = format!("Available root {kind} fields ({}):", fields.len());
        for field in fields.iter().take(limit) {
            out.push_str("\n- ");
            out.push_str(&field.signature());
            if let Some(description) = field.description.as_deref().and_then(first_line) {
                out.push_str(" - ");
                out.push_str(&description);
            }
        }
        if fields.len() > limit {
            out.push_str(&format!("\n... and {} more", fields.len() - limit));
        }
        Some(out)
    }

    /// SDL-like rendering of a single type.
    pub fn describe_type(&self, name: &str) -> Option<String> {
        let ty = self.find_type(name)?;
        let type_name = ty.name.as_deref().unwrap_or(name);

        let mut out = String::new();
        if let Some(description) = ty.description.as_deref().filter(|d| !d.is_empty()) {
            for line in description.lines() {
                out.push_str(&format!("# {line}\n"));
            }
        }

        let keyword = match ty.kind.as_str() {
            "OBJECT" => "type",
            "INTERFACE" => "interface",
            "INPUT_OBJECT" => "input",
            "ENUM" => "enum",
            "UNION" => "union",
            "SCALAR" => "scalar",
            other => other,
        };
        out.push_str(&format!("{keyword} {type_name}"));

        let implements: Vec<String> = ty
            .interfaces
            .iter()
            .flatten()
            .map(|i| i.to_string())
            .collect();
        if !implements.is_empty() {
            out.push_str(&format!(" implements {}", implements.join(" & ")));
        }

        match ty.kind.as_str() {
            "SCALAR" => {}
            "UNION" => {
                let members: Vec<String> = ty
                    .possible_types
                    .iter()
                    .flatten()
                    .map(|t| t.to_string())
                    .collect();
                out.push_str(&format!(" = {}", members.join(" | ")));
            }
            "ENUM" => {
                out.push_str(" {");
                for value in ty.enum_values.iter().flatten() {
                    out.push_str(&format!("\n  {}", value.name));
                    if value.is_deprecated {
                        out.push_str(" @deprecated");
                    }
                }
                out.push_str("\n}");
            }
            "INPUT_OBJECT" => {
                out.push_str(" {");
                for input in ty.input_fields.iter().flatten() {
                    out.push_str(&format!("\n  {}", input.signature()));
                    push_description(&mut out, input.description.as_deref());
                }
                out.push_str("\n}");
            }
            _ => {
                out.push_str(" {");
                for field in ty.fields.iter().flatten() {
                    out.push_str(&format!("\n  {}", field.signature()));
                    if field.is_deprecated {
                        out.push_str(" @deprecated");
                    }
                    push_description(&mut out, field.description.as_deref());
                }
                out.push_str("\n}");
            }
        }

        Some(out)
    }
}

fn push_description(out: &mut String, description: Option<&str>) {
    if let Some(description) = description.and_then(first_line) {
        out.push_str("  # ");
        out.push_str(&description);
    }
}

/// First non-empty line, truncated for inline display.
fn first_line(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    match line.char_indices().nth(MAX_DESCRIPTION) {
        Some((idx, _)) => Some(format!("{}...", &line[..idx])),
        None => Some(line.to_string()),
    }
}
