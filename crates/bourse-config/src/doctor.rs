//! Preflight (`bourse doctor`) settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connectors checked at the same time.
const fn default_concurrency() -> usize {
    4
}

/// Per-connector time budget in milliseconds.
const fn default_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoctorConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl DoctorConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject values the preflight cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero concurrency or timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "doctor.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "doctor.timeout_ms".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
