use anyhow::bail;
use bourse_config::{BourseConfig, ManifestFile};
use bourse_core::{Diagnostic, Manifest};
use bourse_schema::{SchemaError, SchemaRegistry};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::context::manifest_path;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub manifest: String,
    pub valid: bool,
    pub schema_errors: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Handle `bourse validate`.
pub fn handle(config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = manifest_path(flags, config);
    let file = ManifestFile::read(&path)?;
    let response = validate_document(&path.display().to_string(), file.value())?;

    output(&response, flags.format)?;
    if !response.valid {
        bail!("{} is not valid", response.manifest);
    }
    Ok(())
}

/// Schema pass first; semantic checks run only on structurally sound documents.
pub fn validate_document(name: &str, value: &Value) -> anyhow::Result<ValidateResponse> {
    let registry = SchemaRegistry::new();
    let schema_errors = match registry.validate_manifest(value) {
        Ok(()) => Vec::new(),
        Err(SchemaError::ValidationFailed { errors }) => errors,
        Err(other) => return Err(other.into()),
    };

    let diagnostics = if schema_errors.is_empty() {
        Manifest::from_value(value.clone())?.diagnostics()
    } else {
        tracing::debug!(count = schema_errors.len(), "skipping semantic checks");
        Vec::new()
    };

    let valid = schema_errors.is_empty() && !diagnostics.iter().any(Diagnostic::is_error);
    Ok(ValidateResponse {
        manifest: name.to_string(),
        valid,
        schema_errors,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use bourse_core::DiagnosticCode;
    use serde_json::json;

    use super::validate_document;

    #[test]
    fn schema_errors_skip_semantic_checks() {
        let response = validate_document(
            "m.json",
            &json!({ "mcpServers": { "x": { "type": "redis" } } }),
        )
        .expect("validation runs");
        assert!(!response.valid);
        assert!(!response.schema_errors.is_empty());
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let response = validate_document(
            "m.json",
            &json!({ "mcpServers": { "memory": { "type": "memory" } } }),
        )
        .expect("validation runs");
        assert!(response.valid);
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].code, DiagnosticCode::UnusedServer);
    }

    #[test]
    fn dangling_route_is_invalid() {
        let response = validate_document(
            "m.json",
            &json!({
                "mcpServers": { "memory": { "type": "memory" } },
                "integrations": {
                    "reporting": { "features": ["daily"], "storage": { "primary": "memory", "versioned": "github" } }
                }
            }),
        )
        .expect("validation runs");
        assert!(!response.valid);
        assert!(response.schema_errors.is_empty());
        assert_eq!(
            response.diagnostics[0].code,
            DiagnosticCode::UnknownRouteTarget
        );
    }
}
