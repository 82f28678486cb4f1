//! Synchronous per-connector checks. Run on the blocking pool by the runner.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bourse_core::placeholder::{expand_placeholders, placeholders};
use bourse_core::{ConnectorKind, ServerDecl};

use crate::env::EnvSource;
use crate::report::Probe;

pub fn check_server(decl: &ServerDecl, base_dir: &Path, env: &dyn EnvSource) -> Vec<Probe> {
    let mut probes = Vec::new();
    if let Some(command) = decl.command.as_deref() {
        probes.push(check_command(command, base_dir, env));
    }
    probes.push(check_env(decl, env));
    if decl.kind == ConnectorKind::Filesystem {
        probes.push(check_paths(&decl.allowed_paths(), base_dir));
    }
    probes
}

fn check_command(command: &str, base_dir: &Path, env: &dyn EnvSource) -> Probe {
    if command.trim().is_empty() {
        return Probe::fail("command", "launch command is blank");
    }

    if command.contains(std::path::MAIN_SEPARATOR) || command.contains('/') {
        let path = resolve(base_dir, command);
        return if path.is_file() {
            Probe::pass("command", path.display().to_string())
        } else {
            Probe::fail("command", format!("{} does not exist", path.display()))
        };
    }

    match env
        .path_dirs()
        .into_iter()
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
    {
        Some(found) => Probe::pass("command", found.display().to_string()),
        None => Probe::fail("command", format!("'{command}' not found on PATH")),
    }
}

fn check_env(decl: &ServerDecl, env: &dyn EnvSource) -> Probe {
    let referenced = decl
        .env
        .values()
        .flat_map(|value| placeholders(value))
        .collect::<BTreeSet<_>>();

    if referenced.is_empty() {
        return Probe::pass("env", "no host variables referenced");
    }

    let lookup = |name: &str| env.var(name).filter(|value| !value.is_empty());
    let missing = decl
        .env
        .values()
        .filter_map(|value| expand_placeholders(value, lookup).err())
        .flatten()
        .collect::<BTreeSet<_>>();

    if missing.is_empty() {
        Probe::pass("env", format!("{} host variable(s) resolved", referenced.len()))
    } else {
        let names = missing.into_iter().collect::<Vec<_>>();
        Probe::fail("env", format!("unset or empty: {}", names.join(", ")))
    }
}

fn check_paths(allowed: &[&str], base_dir: &Path) -> Probe {
    if allowed.is_empty() {
        return Probe::warn("paths", "no allowedPaths declared");
    }

    let missing: Vec<String> = allowed
        .iter()
        .map(|entry| resolve(base_dir, entry))
        .filter(|path| !path.is_dir())
        .map(|path| path.display().to_string())
        .collect();

    if missing.is_empty() {
        Probe::pass("paths", format!("{} director(ies) present", allowed.len()))
    } else {
        Probe::fail("paths", format!("missing: {}", missing.join(", ")))
    }
}

fn resolve(base_dir: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::report::Outcome;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn env_probe_reports_missing_and_empty() {
        let mut decl = ServerDecl::new(ConnectorKind::Github);
        decl.env.insert("A".into(), "${SET}".into());
        decl.env.insert("B".into(), "${EMPTY}-${UNSET}".into());

        let env = env_with(&[("SET", "x"), ("EMPTY", "")]);
        let probe = check_env(&decl, &env);
        assert_eq!(probe.outcome, Outcome::Fail);
        assert_eq!(probe.detail, "unset or empty: EMPTY, UNSET");
    }

    #[test]
    fn env_probe_passes_without_references() {
        let mut decl = ServerDecl::new(ConnectorKind::Memory);
        decl.env.insert("LOG".into(), "debug".into());
        let probe = check_env(&decl, &env_with(&[]));
        assert_eq!(probe.outcome, Outcome::Pass);
    }

    #[test]
    fn command_found_on_path() {
        let temp = TempDir::new().expect("tempdir should create");
        let bin = temp.path().join("bin");
        std::fs::create_dir(&bin).expect("bin should create");
        std::fs::write(bin.join("npx"), "#!/bin/sh\n").expect("write should work");

        let env = env_with(&[("PATH", bin.to_str().expect("utf-8 path"))]);
        assert_eq!(check_command("npx", temp.path(), &env).outcome, Outcome::Pass);
        assert_eq!(check_command("uvx", temp.path(), &env).outcome, Outcome::Fail);
        assert_eq!(check_command("  ", temp.path(), &env).outcome, Outcome::Fail);
    }

    #[test]
    fn relative_command_resolves_against_base_dir() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join("tools")).expect("dir should create");
        std::fs::write(temp.path().join("tools/server"), "").expect("write should work");

        let env = env_with(&[]);
        assert_eq!(
            check_command("./tools/server", temp.path(), &env).outcome,
            Outcome::Pass
        );
        assert_eq!(
            check_command("./tools/absent", temp.path(), &env).outcome,
            Outcome::Fail
        );
    }

    #[test]
    fn paths_probe() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join("data")).expect("dir should create");

        assert_eq!(check_paths(&[], temp.path()).outcome, Outcome::Warn);
        assert_eq!(check_paths(&["./data"], temp.path()).outcome, Outcome::Pass);

        let probe = check_paths(&["./data", "reports"], temp.path());
        assert_eq!(probe.outcome, Outcome::Fail);
        assert!(probe.detail.contains("reports"));
    }

    #[test]
    fn filesystem_connector_gets_paths_probe() {
        let temp = TempDir::new().expect("tempdir should create");
        let decl = ServerDecl::new(ConnectorKind::Filesystem);
        let names: Vec<String> = check_server(&decl, temp.path(), &env_with(&[]))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["env", "paths"]);
    }
}
