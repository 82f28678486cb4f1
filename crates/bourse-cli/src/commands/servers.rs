use bourse_config::BourseConfig;
use bourse_core::{ConnectorKind, Manifest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::load_manifest;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ServerRow {
    name: String,
    #[serde(rename = "type")]
    kind: ConnectorKind,
    command: Option<String>,
    config_keys: Vec<String>,
    consumers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ServersResponse {
    servers: Vec<ServerRow>,
}

/// Handle `bourse servers`.
pub fn handle(config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load_manifest(flags, config)?;
    output(&server_rows(&loaded.manifest), flags.format)
}

fn server_rows(manifest: &Manifest) -> ServersResponse {
    let servers = manifest
        .mcp_servers
        .iter()
        .map(|(name, decl)| ServerRow {
            name: name.clone(),
            kind: decl.kind,
            command: decl.command.as_ref().map(|command| {
                std::iter::once(command.as_str())
                    .chain(decl.args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            }),
            config_keys: decl.config_keys().into_iter().map(str::to_string).collect(),
            consumers: manifest
                .consumers(name)
                .into_iter()
                .map(|route| format!("{}/{}", route.integration, route.tier))
                .collect(),
        })
        .collect();
    ServersResponse { servers }
}
