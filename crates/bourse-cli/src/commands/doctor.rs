use anyhow::bail;
use bourse_config::BourseConfig;
use bourse_doctor::Doctor;

use crate::cli::GlobalFlags;
use crate::context::load_manifest;
use crate::output::output;

/// Handle `bourse doctor`.
pub async fn handle(config: &BourseConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load_manifest(flags, config)?;
    let doctor = Doctor::with_process_env(config.doctor.clone())?;

    tracing::debug!(
        manifest = %loaded.path().display(),
        connectors = loaded.manifest.mcp_servers.len(),
        "running preflight"
    );
    let report = doctor.run(&loaded.manifest, &loaded.file.base_dir()).await;

    output(&report, flags.format)?;
    if report.has_failures() {
        bail!("{} connector(s) failed preflight", report.failed);
    }
    Ok(())
}
