//! # bourse-core
//!
//! Core types for the Bourse connector manifest.
//!
//! The manifest is the JSON document that declares the MCP connectors a
//! market-analysis assistant may call (`mcpServers`), which integrations route
//! their data to which connector (`integrations`), and the declared
//! `security` / `performance` policies.
//!
//! This crate provides:
//! - Typed manifest structs with `serde` + `schemars` derives
//! - Storage routing resolution (`primary` / `persistent` / `versioned`)
//! - Interval literals (`30d`, `12h`) used by declared policies
//! - `${NAME}` environment placeholder scanning and expansion
//! - Semantic diagnostics that structural schema validation cannot express

pub mod diagnostics;
pub mod errors;
pub mod interval;
pub mod manifest;
pub mod placeholder;
pub mod routing;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use errors::CoreError;
pub use interval::Interval;
pub use manifest::{
    ConnectorKind, IntegrationDecl, Manifest, PerformancePolicy, SecurityPolicy, ServerDecl,
};
pub use routing::{StorageRoute, StorageRouting, StorageTier};
