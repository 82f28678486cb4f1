//! General settings.

use serde::{Deserialize, Serialize};

/// Default manifest location, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "mcp-config.json";

fn default_manifest_path() -> String {
    DEFAULT_MANIFEST_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Manifest file used when `--manifest` is not given.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(GeneralConfig::default().manifest_path, "mcp-config.json");
    }
}
