//! # bourse-doctor
//!
//! Local preflight for the connectors a manifest declares.
//!
//! Every connector is checked in its own task, bounded by a semaphore and a
//! per-connector timeout. Checks only look at the host: the launch command,
//! the environment variables referenced from `env`, and (for filesystem
//! connectors) the directories listed in `config.allowedPaths`. No connector
//! is ever started.

mod checks;
mod env;
mod error;
mod report;
mod runner;

pub use env::{EnvSource, ProcessEnv};
pub use error::DoctorError;
pub use report::{DoctorReport, Outcome, Probe, ServerReport, ServerStatus};
pub use runner::Doctor;
