//! Structural validation of manifest documents.

use bourse_schema::{SchemaError, SchemaRegistry};
use rstest::rstest;
use serde_json::{Value, json};

fn valid() -> Value {
    json!({
        "mcpServers": {
            "github": {
                "type": "github",
                "env": { "GITHUB_TOKEN": "${GITHUB_TOKEN}" },
                "config": { "rateLimit": 5000 }
            },
            "memory": { "type": "memory" }
        },
        "integrations": {
            "marketAnalysis": {
                "features": ["trend-detection"],
                "storage": { "primary": "memory", "versioned": "github" }
            }
        },
        "security": { "encryption": "AES-256-GCM", "keyRotation": "30d" },
        "performance": { "cacheStrategy": "lru", "alertThresholds": { "errorRate": 0.05 } }
    })
}

#[test]
fn accepts_well_formed_manifest() {
    let reg = SchemaRegistry::new();
    assert!(reg.validate_manifest(&valid()).is_ok());
}

#[test]
fn accepts_minimal_manifest() {
    let reg = SchemaRegistry::new();
    assert!(reg.validate_manifest(&json!({ "mcpServers": {} })).is_ok());
}

#[rstest]
#[case::missing_servers(json!({ "integrations": {} }))]
#[case::servers_not_object(json!({ "mcpServers": [] }))]
#[case::unknown_type(json!({ "mcpServers": { "x": { "type": "redis" } } }))]
#[case::missing_type(json!({ "mcpServers": { "x": { "config": {} } } }))]
#[case::env_not_strings(json!({ "mcpServers": { "x": { "type": "memory", "env": { "A": 1 } } } }))]
#[case::features_not_list(json!({
    "mcpServers": {},
    "integrations": { "reporting": { "features": "daily" } }
}))]
#[case::storage_target_not_string(json!({
    "mcpServers": {},
    "integrations": { "reporting": { "storage": { "primary": 3 } } }
}))]
#[case::threshold_not_number(json!({
    "mcpServers": {},
    "performance": { "alertThresholds": { "errorRate": "high" } }
}))]
fn rejects_structural_problems(#[case] document: Value) {
    let reg = SchemaRegistry::new();
    let result = reg.validate_manifest(&document);
    match result {
        Err(SchemaError::ValidationFailed { errors }) => assert!(!errors.is_empty()),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn cross_references_are_not_schema_errors() {
    let reg = SchemaRegistry::new();
    let mut doc = valid();
    doc["integrations"]["marketAnalysis"]["storage"]["persistent"] = json!("nowhere");
    assert!(reg.validate_manifest(&doc).is_ok());
}
