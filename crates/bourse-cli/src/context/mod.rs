mod env_warnings;
mod manifest;

pub use env_warnings::warn_suspicious_env;
pub use manifest::{LoadedManifest, load_manifest, manifest_path};
