use anyhow::{Context, bail};
use bourse_config::BourseConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::InitArgs;
use crate::context::manifest_path;
use crate::output::output;

/// Starter manifest: three connectors, three integrations.
pub const STARTER_MANIFEST: &str = include_str!("../../templates/mcp-config.json");

#[derive(Debug, Serialize)]
struct InitResponse {
    manifest: String,
    overwritten: bool,
}

/// Handle `bourse init`.
pub fn handle(args: &InitArgs, config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = manifest_path(flags, config);
    let existed = path.exists();
    if existed && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, STARTER_MANIFEST)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote starter manifest");

    output(
        &InitResponse {
            manifest: path.display().to_string(),
            overwritten: existed,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use bourse_config::BourseConfig;
    use bourse_core::Manifest;
    use tempfile::TempDir;

    use super::{STARTER_MANIFEST, handle};
    use crate::cli::commands::InitArgs;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags_for(path: &std::path::Path) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            manifest: Some(path.display().to_string()),
            quiet: true,
            color: ColorMode::Never,
        }
    }

    #[test]
    fn writes_then_refuses_without_force() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("conf/mcp-config.json");
        let flags = flags_for(&path);
        let config = BourseConfig::default();

        handle(&InitArgs { force: false }, &config, &flags).expect("first init writes");
        assert_eq!(
            std::fs::read_to_string(&path).expect("manifest written"),
            STARTER_MANIFEST
        );

        let err = handle(&InitArgs { force: false }, &config, &flags).unwrap_err();
        assert!(err.to_string().contains("--force"));

        std::fs::write(&path, "{}").expect("write should work");
        handle(&InitArgs { force: true }, &config, &flags).expect("forced init writes");
        assert_eq!(
            std::fs::read_to_string(&path).expect("manifest written"),
            STARTER_MANIFEST
        );
    }

    #[test]
    fn starter_manifest_is_clean() {
        let manifest = Manifest::from_json_str(STARTER_MANIFEST).expect("starter parses");
        assert_eq!(manifest.mcp_servers.len(), 3);
        assert_eq!(manifest.integrations.len(), 3);
        assert!(manifest.diagnostics().is_empty());
    }

    #[test]
    fn starter_manifest_passes_schema() {
        let value: serde_json::Value =
            serde_json::from_str(STARTER_MANIFEST).expect("starter is json");
        assert!(
            bourse_schema::SchemaRegistry::new()
                .validate_manifest(&value)
                .is_ok()
        );
    }
}
