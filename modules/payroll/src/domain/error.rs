use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("staff member not found: {id}")]
    StaffNotFound { id: Uuid },

    #[error("salary player not found: {id}")]
    PlayerNotFound { id: Uuid },

    #[error("no salary configured for player {id}")]
    NoSalary { id: Uuid },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn staff_not_found(id: Uuid) -> Self {
        Self::StaffNotFound { id }
    }

    pub fn player_not_found(id: Uuid) -> Self {
        Self::PlayerNotFound { id }
    }

    pub fn no_salary(id: Uuid) -> Self {
        Self::NoSalary { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
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
