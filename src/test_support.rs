//! Shared test fixtures.

use serde_json::json;

use crate::graphql::Schema;

/// Introspected `__schema` of a small GitLab-like API.
pub(crate) fn sample_schema_json() -> serde_json::Value {
    json!({
        "queryType": { "name": "Query" },
        "mutationType": { "name": "Mutation" },
        "subscriptionType": null,
        "types": [
            {
                "kind": "OBJECT",
                "name": "Query",
                "description": null,
                "fields": [
                    {
                        "name": "project",
                        "description": "Find a project.\nMore detail here.",
                        "args": [
                            { "name": "fullPath", "description": null, "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }, "defaultValue": null }
                        ],
                        "type": { "kind": "OBJECT", "name": "Project", "ofType": null },
                        "isDeprecated": false,
                        "deprecationReason": null
                    },
                    {
                        "name": "currentUser",
                        "description": "Get information about current user.",
                        "args": [],
                        "type": { "kind": "OBJECT", "name": "UserCore", "ofType": null },
                        "isDeprecated": false,
                        "deprecationReason": null
                    },
                    {
                        "name": "echo",
                        "description": null,
                        "args": [],
                        "type": { "kind": "SCALAR", "name": "String", "ofType": null },
                        "isDeprecated": true,
                        "deprecationReason": "Use something else"
                    }
                ],
                "inputFields": null,
                "interfaces": [],
                "enumValues": null,
                "possibleTypes": null
            },
            {
                "kind": "OBJECT",
                "name": "Mutation",
                "description": null,
                "fields": [
                    {
                        "name": "createIssue",
                        "description": null,
                        "args": [
                            { "name": "input", "description": null, "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "INPUT_OBJECT", "name": "CreateIssueInput", "ofType": null } }, "defaultValue": null }
                        ],
                        "type": { "kind": "OBJECT", "name": "CreateIssuePayload", "ofType": null },
                        "isDeprecated": false,
                        "deprecationReason": null
                    }
                ],
                "inputFields": null,
                "interfaces": [],
                "enumValues": null,
                "possibleTypes": null
            },
            {
                "kind": "OBJECT",
                "name": "Project",
                "description": "A GitLab project.",
                "fields": [
                    {
                        "name": "issues",
                        "description": "Issues of the project.",
                        "args": [
                            { "name": "first", "description": null, "type": { "kind": "SCALAR", "name": "Int", "ofType": null }, "defaultValue": "20" }
                        ],
                        "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "LIST", "name": null, "ofType": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "OBJECT", "name": "Issue", "ofType": null } } } },
                        "isDeprecated": false,
                        "deprecationReason": null
                    }
                ],
                "inputFields": null,
                "interfaces": [ { "kind": "INTERFACE", "name": "Todoable", "ofType": null } ],
                "enumValues": null,
                "possibleTypes": null
            },
            {
                "kind": "ENUM",
                "name": "IssueState",
                "description": null,
                "fields": null,
                "inputFields": null,
                "interfaces": null,
                "enumValues": [
                    { "name": "opened", "description": null, "isDeprecated": false, "deprecationReason": null },
                    { "name": "closed", "description": null, "isDeprecated": false, "deprecationReason": null },
                    { "name": "locked", "description": null, "isDeprecated": true, "deprecationReason": "gone" }
                ],
                "possibleTypes": null
            },
            {
                "kind": "INPUT_OBJECT",
                "name": "CreateIssueInput",
                "description": null,
                "fields": null,
                "inputFields": [
                    { "name": "projectPath", "description": "Project full path.", "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }, "defaultValue": null },
                    { "name": "title", "description": null, "type": { "kind": "SCALAR", "name": "String", "ofType": null }, "defaultValue": null }
                ],
                "interfaces": null,
                "enumValues": null,
                "possibleTypes": null
            },
            {
                "kind": "UNION",
                "name": "Issuable",
                "description": null,
                "fields": null,
                "inputFields": null,
                "interfaces": null,
                "enumValues": null,
                "possibleTypes": [
                    { "kind": "OBJECT", "name": "Issue", "ofType": null },
                    { "kind": "OBJECT", "name": "MergeRequest", "ofType": null }
                ]
            }
        ]
    })
}

pub(crate) fn sample_schema() -> Schema {
    serde_json::from_value(sample_schema_json()).unwrap()
}
