use std::path::{Path, PathBuf};

use anyhow::Context;
use bourse_config::{BourseConfig, ManifestFile};
use bourse_core::Manifest;

use crate::cli::GlobalFlags;

/// A manifest read from disk and converted to its typed form.
pub struct LoadedManifest {
    pub file: ManifestFile,
    pub manifest: Manifest,
}

impl LoadedManifest {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// `--manifest` wins over `general.manifest_path`.
pub fn manifest_path(flags: &GlobalFlags, config: &BourseConfig) -> PathBuf {
    flags
        .manifest
        .as_deref()
        .map_or_else(|| PathBuf::from(&config.general.manifest_path), PathBuf::from)
}

/// Read and type the manifest, without schema validation.
pub fn load_manifest(flags: &GlobalFlags, config: &BourseConfig) -> anyhow::Result<LoadedManifest> {
    let path = manifest_path(flags, config);
    let file = ManifestFile::read(&path)?;
    let manifest = file
        .typed()
        .with_context(|| format!("{} is not a valid manifest (run `bourse validate`)", path.display()))?;
    Ok(LoadedManifest { file, manifest })
}
