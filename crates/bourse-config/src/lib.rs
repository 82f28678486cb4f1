//! # bourse-config
//!
//! Layered settings for the `bourse` tool, plus manifest file loading.
//!
//! Settings sources (in priority order, highest wins):
//! 1. Environment variables (`BOURSE_*` prefix, `__` as separator)
//! 2. Project-level `.bourse/config.toml`
//! 3. User-level `~/.config/bourse/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `BOURSE_DOCTOR__CONCURRENCY` -> `doctor.concurrency` and
//! `BOURSE_GENERAL__MANIFEST_PATH` -> `general.manifest_path`.
//!
//! # Usage
//!
//! ```no_run
//! use bourse_config::{BourseConfig, ManifestFile};
//!
//! let config = BourseConfig::load_with_dotenv().expect("config");
//! let file = ManifestFile::read(&config.general.manifest_path).expect("manifest");
//! let manifest = file.typed().expect("typed manifest");
//! println!("{} connectors", manifest.mcp_servers.len());
//! ```

mod doctor;
mod error;
mod general;
mod manifest_file;

pub use doctor::DoctorConfig;
pub use error::ConfigError;
pub use general::{DEFAULT_MANIFEST_PATH, GeneralConfig};
pub use manifest_file::ManifestFile;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "BOURSE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BourseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub doctor: DoctorConfig,
}

impl BourseConfig {
    /// Load settings from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`BourseConfig::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on malformed sources and
    /// `ConfigError::InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings after reading the nearest `.env` file.
    ///
    /// # Errors
    ///
    /// See [`BourseConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_nearest_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            tracing::debug!(path = %global_path.display(), "merging user config");
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".bourse/config.toml");
        if local_path.exists() {
            tracing::debug!(path = %local_path.display(), "merging project config");
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.manifest_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.manifest_path".into(),
                reason: "must not be empty".into(),
            });
        }
        self.doctor.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bourse").join("config.toml"))
    }

    /// Load `.env` from the current directory or the nearest ancestor that has one.
    /// A missing file is not an error. A malformed one is logged and skipped.
    fn load_nearest_dotenv() {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv"),
            Err(error) if error.not_found() => {}
            Err(error) => tracing::warn!(%error, "ignoring unreadable .env file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BourseConfig::default();
        assert_eq!(config.general.manifest_path, DEFAULT_MANIFEST_PATH);
        assert_eq!(config.doctor.concurrency, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_manifest_path_is_rejected() {
        let mut config = BourseConfig::default();
        config.general.manifest_path = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.manifest_path"));
    }
}
