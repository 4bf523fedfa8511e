use thiserror::Error;

/// Errors surfaced across the module boundary.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to save settings")]
    SaveFailed,

    #[error("invalid settings payload: {0}")]
    InvalidPayload(String),
}
