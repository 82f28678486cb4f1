//! Preflight results.

use bourse_core::ConnectorKind;
use serde::Serialize;

/// Result of one probe. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Probe {
    pub name: String,
    pub outcome: Outcome,
    pub detail: String,
}

impl Probe {
    pub fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self::new(name, Outcome::Pass, detail)
    }

    pub fn warn(name: &str, detail: impl Into<String>) -> Self {
        Self::new(name, Outcome::Warn, detail)
    }

    pub fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self::new(name, Outcome::Fail, detail)
    }

    fn new(name: &str, outcome: Outcome, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Healthy,
    Degraded,
    Failed,
}

impl From<Outcome> for ServerStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass => Self::Healthy,
            Outcome::Warn => Self::Degraded,
            Outcome::Fail => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerReport {
    pub server: String,
    pub kind: ConnectorKind,
    pub status: ServerStatus,
    pub probes: Vec<Probe>,
}

impl ServerReport {
    /// Status is the worst probe outcome; no probes means healthy.
    #[must_use]
    pub fn new(server: String, kind: ConnectorKind, probes: Vec<Probe>) -> Self {
        let worst = probes
            .iter()
            .map(|probe| probe.outcome)
            .max()
            .unwrap_or(Outcome::Pass);
        Self {
            server,
            kind,
            status: worst.into(),
            probes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub servers: Vec<ServerReport>,
    pub healthy: usize,
    pub degraded: usize,
    pub failed: usize,
}

impl DoctorReport {
    /// Sorts servers by name and tallies statuses.
    #[must_use]
    pub fn from_servers(mut servers: Vec<ServerReport>) -> Self {
        servers.sort_by(|a, b| a.server.cmp(&b.server));
        let count = |status: ServerStatus| servers.iter().filter(|s| s.status == status).count();
        let healthy = count(ServerStatus::Healthy);
        let degraded = count(ServerStatus::Degraded);
        let failed = count(ServerStatus::Failed);
        Self {
            servers,
            healthy,
            degraded,
            failed,
        }
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
