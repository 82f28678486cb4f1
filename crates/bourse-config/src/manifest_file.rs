//! Reading manifest documents from disk.
//!
//! The raw JSON is kept alongside the path so callers can run schema
//! validation on the untyped value before converting it.

use std::path::{Path, PathBuf};

use bourse_core::Manifest;
use serde_json::Value;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: PathBuf,
    value: Value,
}

impl ManifestFile {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Json` if it is not JSON.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded manifest");
        Ok(Self { path, value })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative paths inside the manifest resolve against.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Convert to the typed manifest.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Manifest` when the JSON does not fit the model.
    pub fn typed(&self) -> Result<Manifest, ConfigError> {
        Manifest::from_value(self.value.clone()).map_err(ConfigError::from)
    }
}
