use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewNotification, Notification};
use crate::domain::error::DomainError;
use crate::domain::repo::NotificationsRepository;

pub const DEFAULT_RECENT_LIMIT: u64 = 10;

/// Operations over the notification log.
pub struct NotificationsService {
    repo: Arc<dyn NotificationsRepository>,
}

impl NotificationsService {
    pub fn new(repo: Arc<dyn NotificationsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, new), fields(user_id = %new.user_id, kind = %new.kind))]
    pub async fn create(&self, new: NewNotification) -> Result<Notification, DomainError> {
        let created = self.repo.insert(new).await?;
        info!(id = %created.id, "notification created");
        Ok(created)
    }

    pub async fn list_recent(
        &self,
        user_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, DomainError> {
        self.repo
            .list_recent(user_id, limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .await
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.repo.unread_count(user_id).await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.mark_read(id).await
    }
}
