//! Tests for the schema lookup tool and tool descriptions.

use rmcp::model::{ErrorCode, RawContent};

use crate::config::Provider;
use crate::graphql::Schema;
use crate::mcp::tools::schema::{DescribeTypeParams, describe_type};
use crate::mcp::tools::{DESCRIBE_TOOL, MUTATE_TOOL, QUERY_TOOL, tool_descriptions};

fn schema() -> Schema {
    crate::test_support::sample_schema()
}

fn params(name: &str) -> DescribeTypeParams {
    DescribeTypeParams {
        name: name.to_string(),
    }
}

#[test]
fn test_describe_known_type() {
    let result = describe_type(&schema(), params(" Project ")).unwrap();

    let text = match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.as_str(),
        _ => panic!("Expected text content in test"),
    };
    assert!(text.contains("type Project"));
    assert!(text.contains("issues(first: Int = 20): [Issue!]!"));
}

#[test]
fn test_describe_unknown_type_suggests_names() {
    let err = describe_type(&schema(), params("Issu")).unwrap_err();

    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert_eq!(err.message, "type_not_found");
    let data = err.data.unwrap();
    assert_eq!(
        data["suggestions"],
        serde_json::json!(["CreateIssueInput", "Issuable", "IssueState"])
    );
}

#[test]
fn test_descriptions_embed_summaries() {
    let descriptions = tool_descriptions(
        Provider::Gitlab,
        "https://gitlab.com/api/graphql",
        &schema(),
        40,
    );

    let names: Vec<&str> = descriptions.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec![QUERY_TOOL, MUTATE_TOOL, DESCRIBE_TOOL]);

    let query = &descriptions[0].1;
    assert!(query.contains("GitLab API (https://gitlab.com/api/graphql)"));
    assert!(query.contains("Available root query fields (2):"));
    assert!(query.contains("- project(fullPath: ID!): Project"));

    let mutate = &descriptions[1].1;
    assert!(mutate.contains("Available root mutation fields (1):"));
    assert!(mutate.contains("- createIssue(input: CreateIssueInput!): CreateIssuePayload"));

    assert!(descriptions[2].1.contains("(6 types)"));
}

#[test]
fn test_descriptions_without_mutation_root() {
    let mut schema = schema();
    schema.mutation_type = None;

    let descriptions = tool_descriptions(Provider::Custom, "http://localhost/graphql", &schema, 40);

    assert!(descriptions[1].1.ends_with("The schema defines no mutations."));
    assert!(descriptions[0].1.contains("GraphQL API"));
}
