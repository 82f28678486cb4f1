use anyhow::Context;
use bourse_config::BourseConfig;

pub fn load_config() -> anyhow::Result<BourseConfig> {
    let config = BourseConfig::load_with_dotenv().context("failed to load bourse settings")?;
    crate::context::warn_suspicious_env(std::env::vars());
    tracing::debug!(
        manifest = %config.general.manifest_path,
        concurrency = config.doctor.concurrency,
        timeout_ms = config.doctor.timeout_ms,
        "settings loaded"
    );
    Ok(config)
}
