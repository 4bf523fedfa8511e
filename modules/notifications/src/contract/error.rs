use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced across the module boundary.
#[derive(Debug, Error)]
pub enum NotificationsError {
    #[error("notification not found: {id}")]
    NotFound { id: Uuid },

    #[error("internal error")]
    Internal,
}
