//! Error types shared by the manifest model.
//!
//! Loading errors that involve files live in `bourse-config`; schema errors
//! live in `bourse-schema`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The document is JSON but does not match the manifest shape.
    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An interval literal such as `30d` could not be parsed.
    #[error("Invalid interval '{input}': {reason}")]
    InvalidInterval { input: String, reason: String },

    /// A lookup or cross-reference failed.
    #[error("Validation error: {0}")]
    Validation(String),
}
