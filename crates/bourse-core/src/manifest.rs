//! Typed view of the connector manifest.
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "github":     { "type": "github", "config": { "repositories": ["org/research"] } },
//!     "memory":     { "type": "memory", "config": { "ttlSeconds": 3600 } },
//!     "filesystem": { "type": "filesystem", "config": { "allowedPaths": ["./data"] } }
//!   },
//!   "integrations": {
//!     "marketAnalysis": {
//!       "features": ["trend-detection"],
//!       "storage": { "primary": "memory", "persistent": "filesystem" }
//!     }
//!   },
//!   "security": { "encryption": "AES-256-GCM", "keyRotation": "30d" },
//!   "performance": { "cacheStrategy": "lru", "alertThresholds": { "errorRate": 0.05 } }
//! }
//! ```
//!
//! Connector `config` objects are opaque to Bourse apart from the few keys the
//! preflight reads (`allowedPaths`). Unknown keys in integrations and policies
//! are preserved in `extra` so a load/save cycle does not drop them.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::routing::StorageRouting;

/// Config key listing directories a filesystem connector may touch.
pub const ALLOWED_PATHS_KEY: &str = "allowedPaths";

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// The whole manifest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Manifest {
    /// Declared connectors, keyed by connector name.
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, ServerDecl>,

    /// Integrations (`marketAnalysis`, `riskManagement`, `reporting`, ...).
    #[serde(default)]
    pub integrations: BTreeMap<String, IntegrationDecl>,

    #[serde(default)]
    pub security: SecurityPolicy,

    #[serde(default)]
    pub performance: PerformancePolicy,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` when the text is not JSON or does not match
    /// the manifest shape.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(CoreError::from)
    }

    /// Convert an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` when the value does not match the manifest shape.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(CoreError::from)
    }

    #[must_use]
    pub fn server(&self, name: &str) -> Option<&ServerDecl> {
        self.mcp_servers.get(name)
    }

    #[must_use]
    pub fn integration(&self, name: &str) -> Option<&IntegrationDecl> {
        self.integrations.get(name)
    }

    /// Look up an integration, failing with a message that lists known names.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `name` is not declared.
    pub fn require_integration(&self, name: &str) -> Result<&IntegrationDecl, CoreError> {
        self.integration(name).ok_or_else(|| {
            let known = self
                .integrations
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            CoreError::Validation(format!(
                "unknown integration '{name}' (declared: {known})"
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Connectors
// ---------------------------------------------------------------------------

/// The kind of service a connector fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Version-control service.
    Github,
    /// In-memory cache service.
    Memory,
    /// Local filesystem service.
    Filesystem,
}

impl ConnectorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Memory => "memory",
            Self::Filesystem => "filesystem",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry under `mcpServers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServerDecl {
    #[serde(rename = "type")]
    pub kind: ConnectorKind,

    /// Executable used to launch the connector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment passed to the connector; values may hold `${NAME}` references.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Declared capabilities, limits and permissions.
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl ServerDecl {
    #[must_use]
    pub fn new(kind: ConnectorKind) -> Self {
        Self {
            kind,
            command: None,
            args: Vec::new(),
            env: BTreeMap::new(),
            config: Map::new(),
        }
    }

    /// Entries of `config.allowedPaths` that are strings. Non-string entries are skipped.
    #[must_use]
    pub fn allowed_paths(&self) -> Vec<&str> {
        self.config
            .get(ALLOWED_PATHS_KEY)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Sorted top-level keys of `config`.
    #[must_use]
    pub fn config_keys(&self) -> Vec<&str> {
        self.config.keys().map(String::as_str).collect()
    }
}

// ---------------------------------------------------------------------------
// Integrations
// ---------------------------------------------------------------------------

/// An integration: the features it offers and where its data lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IntegrationDecl {
    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub storage: StorageRouting,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Declared security policy. Values are recorded and validated, never enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPolicy {
    /// Encryption algorithm name, e.g. `AES-256-GCM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,

    /// Key rotation interval literal, e.g. `30d`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_rotation: Option<String>,

    /// Authentication method name, e.g. `oauth2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Declared performance policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_strategy: Option<String>,

    /// Named alert thresholds, e.g. `errorRate: 0.05`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alert_thresholds: BTreeMap<String, f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
