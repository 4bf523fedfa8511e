use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::contract::model::{NewNotification, Notification};
use crate::domain::error::DomainError;
use crate::domain::repo::NotificationsRepository;
use crate::infra::storage::entity;

pub struct SeaOrmNotificationsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmNotificationsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_model(m: entity::Model) -> Notification {
    Notification {
        id: m.id,
        user_id: m.user_id,
        kind: m.kind,
        title: m.title,
        message: m.message,
        read: m.read,
        created_at: m.created_at,
    }
}

#[async_trait]
impl NotificationsRepository for SeaOrmNotificationsRepository {
    async fn insert(&self, new: NewNotification) -> Result<Notification, DomainError> {
        let model = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new.user_id),
            kind: Set(new.kind),
            title: Set(new.title),
            message: Set(new.message),
            read: Set(false),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(to_model(inserted))
    }

    async fn list_recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(to_model).collect())
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let count = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::Read.eq(false))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), DomainError> {
        let Some(row) = entity::Entity::find_by_id(id).one(self.db.as_ref()).await? else {
            return Err(DomainError::not_found(id));
        };
        let mut active = row.into_active_model();
        active.read = Set(true);
        active.update(self.db.as_ref()).await?;
        Ok(())
    }
}
