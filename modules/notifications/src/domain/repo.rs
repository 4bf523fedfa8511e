use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{NewNotification, Notification};
use crate::domain::error::DomainError;

/// Storage port for the append-only notification log.
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn insert(&self, new: NewNotification) -> Result<Notification, DomainError>;

    /// Newest first.
    async fn list_recent(&self, user_id: Uuid, limit: u64) -> Result<Vec<Notification>, DomainError>;

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Flip the `read` flag; `NotFound` when the row does not exist.
    async fn mark_read(&self, id: Uuid) -> Result<(), DomainError>;
}
