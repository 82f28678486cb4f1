//! Host environment access, abstracted so tests can supply a fixed map.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

pub trait EnvSource: Send + Sync {
    /// Value of a variable, `None` when unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Directories searched for bare command names.
    fn path_dirs(&self) -> Vec<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn path_dirs(&self) -> Vec<PathBuf> {
        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn path_dirs(&self) -> Vec<PathBuf> {
        self.get("PATH")
            .map(|paths| std::env::split_paths(&OsString::from(paths)).collect())
            .unwrap_or_default()
    }
}
