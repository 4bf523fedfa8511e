use async_trait::async_trait;

use crate::contract::model::{NewNotification, Notification};

/// Cross-module API for appending notifications.
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    async fn notify(&self, new: NewNotification) -> anyhow::Result<Notification>;
}
