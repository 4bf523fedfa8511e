use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("stored settings blob is not valid JSON for the settings shape: {message}")]
    Decode { message: String },
}

impl RepoError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for RepoError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
