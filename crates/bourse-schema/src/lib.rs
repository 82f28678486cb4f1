//! # bourse-schema
//!
//! JSON Schema generation and validation for the Bourse manifest.
//!
//! Manifest types are defined in `bourse-core` with `#[derive(JsonSchema)]`.
//! This crate turns them into schemas once, at registry construction, and
//! validates raw JSON documents before they are typed. Schema errors describe
//! *structural* problems; cross-reference problems are reported by
//! `bourse_core::Manifest::diagnostics`.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{MANIFEST_SCHEMA, SchemaRegistry};
