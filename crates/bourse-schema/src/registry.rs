//! Registry of manifest schemas.
//!
//! Schemas are built with [`schemars::schema_for!`] at construction time and
//! compiled with `jsonschema` on each validation call.

use std::collections::HashMap;

use bourse_core::{
    Diagnostic, IntegrationDecl, Manifest, PerformancePolicy, SecurityPolicy, ServerDecl,
};
use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the whole-document schema.
pub const MANIFEST_SCHEMA: &str = "manifest";

/// Store of every JSON Schema Bourse publishes.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the manifest and its sections.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated
    /// schema, which `schemars` output never does.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, MANIFEST_SCHEMA, Manifest);
        register!(schemas, "server_decl", ServerDecl);
        register!(schemas, "integration_decl", IntegrationDecl);
        register!(schemas, "security_policy", SecurityPolicy);
        register!(schemas, "performance_policy", PerformancePolicy);
        register!(schemas, "diagnostic", Diagnostic);

        Self { schemas }
    }

    /// Get a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for an unknown name,
    /// `SchemaError::Generation` if the schema does not compile, or
    /// `SchemaError::ValidationFailed` with every validator message.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    format!("{e}")
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a whole manifest document.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::validate`].
    pub fn validate_manifest(&self, instance: &serde_json::Value) -> Result<(), SchemaError> {
        self.validate(MANIFEST_SCHEMA, instance)
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn registry_lists_sorted_names() {
        let reg = SchemaRegistry::new();
        assert_eq!(reg.schema_count(), 6);
        assert_eq!(
            reg.list(),
            vec![
                "diagnostic",
                "integration_decl",
                "manifest",
                "performance_policy",
                "security_policy",
                "server_decl",
            ]
        );
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let reg = SchemaRegistry::new();
        assert!(reg.get("bogus").is_none());
        let result = reg.validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn validates_server_decl() {
        let reg = SchemaRegistry::new();
        assert!(reg
            .validate("server_decl", &json!({ "type": "github", "config": {} }))
            .is_ok());

        let err = reg
            .validate("server_decl", &json!({ "type": "ftp" }))
            .unwrap_err();
        assert!(!err.validation_errors().is_empty());
    }

    #[test]
    fn validation_messages_carry_instance_path() {
        let reg = SchemaRegistry::new();
        let err = reg
            .validate_manifest(&json!({
                "mcpServers": { "memory": { "type": "memory", "args": "not-a-list" } }
            }))
            .unwrap_err();

        let errors = err.validation_errors();
        assert!(
            errors.iter().any(|e| e.starts_with("/mcpServers/memory/args")),
            "errors: {errors:?}"
        );
    }
}
