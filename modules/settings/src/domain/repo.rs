use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::UserSettings;
use crate::domain::error::RepoError;

/// Outcome of a full-blob UPDATE, so the caller can fall back to INSERT
/// without inspecting error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NoRow,
}

/// Storage port for the one-blob-per-user settings table.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch and decode the user's settings blob, if a row exists.
    async fn fetch(&self, user_id: Uuid) -> Result<Option<UserSettings>, RepoError>;

    /// Replace the whole blob for an existing row.
    async fn update(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome, RepoError>;

    /// Insert a fresh row for a user with no settings yet.
    async fn insert(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepoError>;
}
