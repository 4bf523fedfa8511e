use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("team not found: {id}")]
    TeamNotFound { id: Uuid },

    #[error("player not found: {id}")]
    PlayerNotFound { id: Uuid },

    #[error("payment not found: {id}")]
    PaymentNotFound { id: Uuid },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("email delivery failed: {message}")]
    Email { message: String },

    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
