use bourse_config::BourseConfig;
use bourse_core::{Manifest, StorageRoute, StorageTier};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::RoutesArgs;
use crate::context::load_manifest;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RoutesResponse {
    routes: Vec<StorageRoute>,
}

/// Handle `bourse routes`.
pub fn handle(args: &RoutesArgs, config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load_manifest(flags, config)?;
    let routes = filter_routes(
        &loaded.manifest,
        args.integration.as_deref(),
        args.tier.as_deref(),
    )?;
    output(&RoutesResponse { routes }, flags.format)
}

fn filter_routes(
    manifest: &Manifest,
    integration: Option<&str>,
    tier: Option<&str>,
) -> anyhow::Result<Vec<StorageRoute>> {
    if let Some(name) = integration {
        manifest.require_integration(name)?;
    }
    let tier = tier.map(str::parse::<StorageTier>).transpose()?;

    Ok(manifest
        .routes()
        .into_iter()
        .filter(|route| integration.is_none_or(|name| route.integration == name))
        .filter(|route| tier.is_none_or(|tier| route.tier == tier))
        .collect())
}
