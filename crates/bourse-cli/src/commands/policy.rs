use std::collections::BTreeMap;

use bourse_config::BourseConfig;
use bourse_core::{Interval, Manifest};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::context::load_manifest;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PolicyResponse {
    encryption: Option<String>,
    key_rotation: Option<String>,
    key_rotation_secs: Option<u64>,
    authentication: Option<String>,
    cache_strategy: Option<String>,
    alert_thresholds: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    security_extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    performance_extra: Map<String, Value>,
}

/// Handle `bourse policy`.
pub fn handle(config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load_manifest(flags, config)?;
    output(&policy_view(&loaded.manifest), flags.format)
}

fn policy_view(manifest: &Manifest) -> PolicyResponse {
    let security = &manifest.security;
    let performance = &manifest.performance;
    PolicyResponse {
        encryption: security.encryption.clone(),
        key_rotation: security.key_rotation.clone(),
        key_rotation_secs: security
            .key_rotation
            .as_deref()
            .and_then(|literal| Interval::parse(literal).ok())
            .map(Interval::as_secs),
        authentication: security.authentication.clone(),
        cache_strategy: performance.cache_strategy.clone(),
        alert_thresholds: performance.alert_thresholds.clone(),
        security_extra: security.extra.clone(),
        performance_extra: performance.extra.clone(),
    }
}
