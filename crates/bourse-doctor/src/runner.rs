//! Concurrent execution of the per-connector checks.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use bourse_config::DoctorConfig;
use bourse_core::Manifest;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::checks::check_server;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::DoctorError;
use crate::report::{DoctorReport, Outcome, Probe, ServerReport, ServerStatus};

pub struct Doctor {
    config: DoctorConfig,
    env: Arc<dyn EnvSource>,
}

impl Doctor {
    /// # Errors
    ///
    /// Returns `DoctorError::Config` when concurrency or timeout is zero.
    pub fn new(config: DoctorConfig, env: Arc<dyn EnvSource>) -> Result<Self, DoctorError> {
        config.validate()?;
        Ok(Self { config, env })
    }

    /// Doctor over the real process environment.
    ///
    /// # Errors
    ///
    /// See [`Doctor::new`].
    pub fn with_process_env(config: DoctorConfig) -> Result<Self, DoctorError> {
        Self::new(config, Arc::new(ProcessEnv))
    }

    /// Check every declared connector. Relative paths resolve against `base_dir`.
    pub async fn run(&self, manifest: &Manifest, base_dir: &Path) -> DoctorReport {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let timeout = self.config.timeout();
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::new();

        for (name, decl) in &manifest.mcp_servers {
            let kind = decl.kind;
            let semaphore = Arc::clone(&semaphore);
            let env = Arc::clone(&self.env);
            let decl = decl.clone();
            let server = name.clone();
            let base_dir = base_dir.to_path_buf();

            let handle = tasks.spawn(async move {
                let Ok(permit) = semaphore.acquire_owned().await else {
                    return ServerReport::new(
                        server,
                        kind,
                        vec![Probe::fail("scheduler", "preflight was cancelled")],
                    );
                };

                // The permit lives on the blocking thread so a timed-out check
                // still counts against the limit until it actually returns.
                let blocking = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    check_server(&decl, &base_dir, env.as_ref())
                });
                let probes = match tokio::time::timeout(timeout, blocking).await {
                    Ok(Ok(probes)) => probes,
                    Ok(Err(join_error)) => {
                        vec![Probe::fail("panic", format!("checks aborted: {join_error}"))]
                    }
                    Err(_) => vec![Probe::fail(
                        "timeout",
                        format!("checks did not finish within {} ms", timeout.as_millis()),
                    )],
                };
                ServerReport::new(server, kind, probes)
            });
            pending.insert(handle.id(), (name.clone(), kind));
        }

        let mut servers = Vec::with_capacity(pending.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, report)) => {
                    pending.remove(&id);
                    log_report(&report);
                    servers.push(report);
                }
                Err(join_error) => {
                    if let Some((server, kind)) = pending.remove(&join_error.id()) {
                        tracing::warn!(%server, error = %join_error, "preflight task failed");
                        servers.push(ServerReport::new(
                            server,
                            kind,
                            vec![Probe::fail("panic", join_error.to_string())],
                        ));
                    }
                }
            }
        }

        DoctorReport::from_servers(servers)
    }
}

fn log_report(report: &ServerReport) {
    match report.status {
        ServerStatus::Healthy => {
            tracing::debug!(server = %report.server, "connector preflight passed");
        }
        ServerStatus::Degraded | ServerStatus::Failed => {
            for probe in report.probes.iter().filter(|p| p.outcome != Outcome::Pass) {
                tracing::warn!(
                    server = %report.server,
                    probe = %probe.name,
                    outcome = ?probe.outcome,
                    detail = %probe.detail,
                    "connector preflight issue"
                );
            }
        }
    }
}
