//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {}", .errors.join("; "))]
    ValidationFailed {
        /// Individual error messages from the validator, prefixed with the instance path.
        errors: Vec<String>,
    },

    /// Schema compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}

impl SchemaError {
    /// Validator messages when this is a validation failure, otherwise empty.
    #[must_use]
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Self::ValidationFailed { errors } => errors,
            _ => &[],
        }
    }
}
