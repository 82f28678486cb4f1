use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoctorError {
    /// Preflight settings are unusable.
    #[error(transparent)]
    Config(#[from] bourse_config::ConfigError),
}
