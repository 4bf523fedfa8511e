use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::client::NotificationsApi;
use crate::contract::error::NotificationsError;
use crate::contract::model::{NewNotification, Notification};
use crate::domain::error::DomainError;
use crate::domain::service::NotificationsService;

/// In-process implementation of [`NotificationsApi`] backed by the domain
/// service; published on the client hub for other modules.
pub struct NotificationsLocalClient {
    service: Arc<NotificationsService>,
}

impl NotificationsLocalClient {
    pub fn new(service: Arc<NotificationsService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl NotificationsApi for NotificationsLocalClient {
    async fn notify(&self, new: NewNotification) -> anyhow::Result<Notification> {
        self.service.create(new).await.map_err(map_domain_error)
    }
}

fn map_domain_error(e: DomainError) -> anyhow::Error {
    let contract_error = match e {
        DomainError::NotFound { id } => NotificationsError::NotFound { id },
        DomainError::Database { .. } => NotificationsError::Internal,
    };
    anyhow::Error::new(contract_error)
}
