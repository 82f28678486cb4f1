//! Storage routing: which connector holds an integration's data per tier.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::manifest::{ConnectorKind, Manifest};

/// Storage tier an integration can route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageTier {
    /// Hot working data.
    Primary,
    /// Data that must survive restarts.
    Persistent,
    /// Data kept under version control.
    Versioned,
}

impl StorageTier {
    pub const ALL: [Self; 3] = [Self::Primary, Self::Persistent, Self::Versioned];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Persistent => "persistent",
            Self::Versioned => "versioned",
        }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown storage tier '{s}' (expected primary, persistent or versioned)"
                ))
            })
    }
}

/// The `storage` object of an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StorageRouting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioned: Option<String>,
}

impl StorageRouting {
    #[must_use]
    pub fn get(&self, tier: StorageTier) -> Option<&str> {
        match tier {
            StorageTier::Primary => self.primary.as_deref(),
            StorageTier::Persistent => self.persistent.as_deref(),
            StorageTier::Versioned => self.versioned.as_deref(),
        }
    }

    /// Routed tiers in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (StorageTier, &str)> {
        StorageTier::ALL
            .into_iter()
            .filter_map(|tier| self.get(tier).map(|server| (tier, server)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// One resolved (integration, tier, connector) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageRoute {
    pub integration: String,
    pub tier: StorageTier,
    pub server: String,
    /// `None` when `server` is not declared under `mcpServers`.
    pub kind: Option<ConnectorKind>,
}

impl Manifest {
    /// Every declared route, ordered by integration name then tier.
    #[must_use]
    pub fn routes(&self) -> Vec<StorageRoute> {
        self.integrations
            .iter()
            .flat_map(|(integration, decl)| {
                decl.storage.iter().map(move |(tier, server)| StorageRoute {
                    integration: integration.clone(),
                    tier,
                    server: server.to_string(),
                    kind: self.server(server).map(|s| s.kind),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn route(&self, integration: &str, tier: StorageTier) -> Option<&str> {
        self.integration(integration)?.storage.get(tier)
    }

    /// Routes that land on `server`.
    #[must_use]
    pub fn consumers(&self, server: &str) -> Vec<StorageRoute> {
        self.routes()
            .into_iter()
            .filter(|route| route.server == server)
            .collect()
    }
}
