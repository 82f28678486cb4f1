//! Semantic checks over a parsed manifest.
//!
//! Structural problems (wrong JSON types, unknown connector `type`) are caught
//! by schema validation before a manifest is ever typed. The checks here cover
//! what a schema cannot express: cross-references between sections, declared
//! values with their own grammar, and hygiene warnings.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::manifest::{ConnectorKind, Manifest};
use crate::placeholder::has_placeholder;

/// Env key fragments that mark a value as a credential.
const SECRET_MARKERS: [&str; 4] = ["TOKEN", "SECRET", "KEY", "PASSWORD"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    NoServers,
    BlankServerName,
    UnknownRouteTarget,
    InvalidKeyRotation,
    NegativeThreshold,
    EmptyFeatures,
    DuplicateFeature,
    NoStorage,
    UnusedServer,
    InlineSecret,
    MissingAllowedPaths,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoServers => "no_servers",
            Self::BlankServerName => "blank_server_name",
            Self::UnknownRouteTarget => "unknown_route_target",
            Self::InvalidKeyRotation => "invalid_key_rotation",
            Self::NegativeThreshold => "negative_threshold",
            Self::EmptyFeatures => "empty_features",
            Self::DuplicateFeature => "duplicate_feature",
            Self::NoStorage => "no_storage",
            Self::UnusedServer => "unused_server",
            Self::InlineSecret => "inline_secret",
            Self::MissingAllowedPaths => "missing_allowed_paths",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::NoServers
            | Self::BlankServerName
            | Self::UnknownRouteTarget
            | Self::InvalidKeyRotation
            | Self::NegativeThreshold => Severity::Error,
            Self::EmptyFeatures
            | Self::DuplicateFeature
            | Self::NoStorage
            | Self::UnusedServer
            | Self::InlineSecret
            | Self::MissingAllowedPaths => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from [`Manifest::diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// JSON Pointer to the offending location.
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(code: DiagnosticCode, path: String, message: String) -> Self {
        Self {
            severity: code.severity(),
            code,
            path,
            message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}: {}", self.severity, self.code, self.path, self.message)
    }
}

/// Build a JSON Pointer from raw segments (RFC 6901 escaping).
#[must_use]
pub fn pointer(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}

impl Manifest {
    /// Run every semantic check, in document order.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.check_servers(&mut out);
        self.check_integrations(&mut out);
        self.check_security(&mut out);
        self.check_performance(&mut out);
        out
    }

    /// `true` when no check produced an error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.diagnostics().iter().any(Diagnostic::is_error)
    }

    fn check_servers(&self, out: &mut Vec<Diagnostic>) {
        if self.mcp_servers.is_empty() {
            out.push(Diagnostic::new(
                DiagnosticCode::NoServers,
                pointer(&["mcpServers"]),
                "no connectors are declared".into(),
            ));
            return;
        }

        let routed: HashSet<String> = self.routes().into_iter().map(|r| r.server).collect();

        for (name, decl) in &self.mcp_servers {
            if name.trim().is_empty() {
                out.push(Diagnostic::new(
                    DiagnosticCode::BlankServerName,
                    pointer(&["mcpServers", name]),
                    "connector name is blank".into(),
                ));
            }

            for (key, value) in &decl.env {
                let upper = key.to_ascii_uppercase();
                let looks_secret = SECRET_MARKERS.iter().any(|marker| upper.contains(marker));
                if looks_secret && !value.is_empty() && !has_placeholder(value) {
                    out.push(Diagnostic::new(
                        DiagnosticCode::InlineSecret,
                        pointer(&["mcpServers", name, "env", key]),
                        format!("'{key}' holds a literal value; reference the host environment with ${{{key}}}"),
                    ));
                }
            }

            if decl.kind == ConnectorKind::Filesystem && decl.allowed_paths().is_empty() {
                out.push(Diagnostic::new(
                    DiagnosticCode::MissingAllowedPaths,
                    pointer(&["mcpServers", name, "config"]),
                    "filesystem connector declares no allowedPaths".into(),
                ));
            }

            if !routed.contains(name) {
                out.push(Diagnostic::new(
                    DiagnosticCode::UnusedServer,
                    pointer(&["mcpServers", name]),
                    format!("connector '{name}' is not the storage target of any integration"),
                ));
            }
        }
    }

    fn check_integrations(&self, out: &mut Vec<Diagnostic>) {
        for (name, decl) in &self.integrations {
            if decl.features.is_empty() {
                out.push(Diagnostic::new(
                    DiagnosticCode::EmptyFeatures,
                    pointer(&["integrations", name, "features"]),
                    format!("integration '{name}' lists no features"),
                ));
            }

            let mut seen = HashSet::new();
            for (index, feature) in decl.features.iter().enumerate() {
                if !seen.insert(feature.as_str()) {
                    out.push(Diagnostic::new(
                        DiagnosticCode::DuplicateFeature,
                        pointer(&["integrations", name, "features", &index.to_string()]),
                        format!("feature '{feature}' is listed more than once"),
                    ));
                }
            }

            if decl.storage.is_empty() {
                out.push(Diagnostic::new(
                    DiagnosticCode::NoStorage,
                    pointer(&["integrations", name, "storage"]),
                    format!("integration '{name}' routes no storage tier"),
                ));
            }

            for (tier, server) in decl.storage.iter() {
                if self.server(server).is_none() {
                    out.push(Diagnostic::new(
                        DiagnosticCode::UnknownRouteTarget,
                        pointer(&["integrations", name, "storage", tier.as_str()]),
                        format!("{tier} storage routes to undeclared connector '{server}'"),
                    ));
                }
            }
        }
    }

    fn check_security(&self, out: &mut Vec<Diagnostic>) {
        let Some(literal) = self.security.key_rotation.as_deref() else {
            return;
        };
        let problem = match Interval::parse(literal) {
            Ok(interval) if interval.is_zero() => Some("key rotation interval must be positive".to_string()),
            Ok(_) => None,
            Err(error) => Some(error.to_string()),
        };
        if let Some(message) = problem {
            out.push(Diagnostic::new(
                DiagnosticCode::InvalidKeyRotation,
                pointer(&["security", "keyRotation"]),
                message,
            ));
        }
    }

    fn check_performance(&self, out: &mut Vec<Diagnostic>) {
        for (name, value) in &self.performance.alert_thresholds {
            if *value < 0.0 {
                out.push(Diagnostic::new(
                    DiagnosticCode::NegativeThreshold,
                    pointer(&["performance", "alertThresholds", name]),
                    format!("alert threshold '{name}' is negative ({value})"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn base() -> Value {
        json!({
            "mcpServers": {
                "memory": { "type": "memory" },
                "filesystem": { "type": "filesystem", "config": { "allowedPaths": ["./data"] } }
            },
            "integrations": {
                "marketAnalysis": {
                    "features": ["trend-detection"],
                    "storage": { "primary": "memory", "persistent": "filesystem" }
                }
            },
            "security": { "keyRotation": "30d" },
            "performance": { "alertThresholds": { "errorRate": 0.05 } }
        })
    }

    fn codes(value: Value) -> Vec<DiagnosticCode> {
        Manifest::from_value(value)
            .unwrap()
            .diagnostics()
            .into_iter()
            .map(|d| d.code)
            .collect()
    }

    #[test]
    fn clean_manifest_has_no_diagnostics() {
        let manifest = Manifest::from_value(base()).unwrap();
        assert!(manifest.diagnostics().is_empty());
        assert!(manifest.is_valid());
    }

    #[test]
    fn empty_servers_short_circuits_server_checks() {
        assert_eq!(
            codes(json!({ "mcpServers": {} })),
            vec![DiagnosticCode::NoServers]
        );
    }

    #[test]
    fn unknown_route_target_is_an_error_with_pointer() {
        let mut doc = base();
        doc["integrations"]["marketAnalysis"]["storage"]["versioned"] = json!("github");
        let manifest = Manifest::from_value(doc).unwrap();
        let diagnostics = manifest.diagnostics();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownRouteTarget);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(
            diagnostics[0].path,
            "/integrations/marketAnalysis/storage/versioned"
        );
        assert!(!manifest.is_valid());
    }

    #[rstest]
    #[case("", "/mcpServers/")]
    #[case("  ", "/mcpServers/  ")]
    fn blank_server_name_is_an_error(#[case] name: &str, #[case] path: &str) {
        let mut doc = base();
        doc["mcpServers"][name] = json!({ "type": "memory" });
        let manifest = Manifest::from_value(doc).unwrap();
        let diagnostics = manifest.diagnostics();

        let blank = diagnostics
            .iter()
            .find(|d| d.code == DiagnosticCode::BlankServerName)
            .expect("blank name flagged");
        assert_eq!(blank.severity, Severity::Error);
        assert_eq!(blank.path, path);
        assert!(!manifest.is_valid());
    }

    #[test]
    fn code_strings_match_serialized_form() {
        for code in [
            DiagnosticCode::NoServers,
            DiagnosticCode::BlankServerName,
            DiagnosticCode::MissingAllowedPaths,
        ] {
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                Value::String(code.as_str().to_string())
            );
        }
    }

    #[rstest]
    #[case(json!("30x"))]
    #[case(json!("0d"))]
    #[case(json!(""))]
    fn invalid_key_rotation(#[case] literal: Value) {
        let mut doc = base();
        doc["security"]["keyRotation"] = literal;
        assert_eq!(codes(doc), vec![DiagnosticCode::InvalidKeyRotation]);
    }

    #[test]
    fn negative_threshold() {
        let mut doc = base();
        doc["performance"]["alertThresholds"]["latencyMs"] = json!(-1);
        assert_eq!(codes(doc), vec![DiagnosticCode::NegativeThreshold]);
    }

    #[test]
    fn integration_hygiene_warnings() {
        let mut doc = base();
        doc["integrations"]["reporting"] = json!({});
        doc["integrations"]["riskManagement"] = json!({
            "features": ["var", "stress", "var"],
            "storage": { "primary": "memory" }
        });

        let manifest = Manifest::from_value(doc).unwrap();
        let diagnostics = manifest.diagnostics();
        let summary: Vec<(DiagnosticCode, &str)> = diagnostics
            .iter()
            .map(|d| (d.code, d.path.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (DiagnosticCode::EmptyFeatures, "/integrations/reporting/features"),
                (DiagnosticCode::NoStorage, "/integrations/reporting/storage"),
                (DiagnosticCode::DuplicateFeature, "/integrations/riskManagement/features/2"),
            ]
        );
        assert!(manifest.is_valid());
    }

    #[test]
    fn unused_server_and_missing_paths() {
        let mut doc = base();
        doc["mcpServers"]["archive"] = json!({ "type": "filesystem" });
        assert_eq!(
            codes(doc),
            vec![
                DiagnosticCode::MissingAllowedPaths,
                DiagnosticCode::UnusedServer,
            ]
        );
    }

    #[rstest]
    #[case("GITHUB_TOKEN", "ghp_abc123", true)]
    #[case("API_KEY", "k-123", true)]
    #[case("DB_PASSWORD", "hunter2", true)]
    #[case("GITHUB_TOKEN", "${GITHUB_TOKEN}", false)]
    #[case("GITHUB_TOKEN", "", false)]
    #[case("LOG_LEVEL", "debug", false)]
    fn inline_secret_detection(#[case] key: &str, #[case] value: &str, #[case] flagged: bool) {
        let mut doc = base();
        doc["mcpServers"]["memory"]["env"] = json!({ key: value });
        let found = codes(doc).contains(&DiagnosticCode::InlineSecret);
        assert_eq!(found, flagged);
    }

    #[test]
    fn pointer_escapes_segments() {
        assert_eq!(pointer(&["mcpServers", "a/b", "c~d"]), "/mcpServers/a~1b/c~0d");
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic = Diagnostic::new(
            DiagnosticCode::NoServers,
            "/mcpServers".into(),
            "no connectors are declared".into(),
        );
        assert_eq!(
            diagnostic.to_string(),
            "error [no_servers] /mcpServers: no connectors are declared"
        );
    }
}
