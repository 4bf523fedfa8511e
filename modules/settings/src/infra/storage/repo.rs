use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::contract::model::UserSettings;
use crate::domain::error::RepoError;
use crate::domain::repo::{SettingsRepository, UpdateOutcome};
use crate::infra::storage::entity;

/// SeaORM-backed settings repository.
pub struct SeaOrmSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn encode(settings: &UserSettings) -> Result<serde_json::Value, RepoError> {
    serde_json::to_value(settings).map_err(|e| RepoError::decode(e.to_string()))
}

/// Decode a stored blob; missing fields are backfilled by serde defaults.
fn decode(blob: serde_json::Value) -> Result<UserSettings, RepoError> {
    serde_json::from_value(blob).map_err(|e| RepoError::decode(e.to_string()))
}

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<UserSettings>, RepoError> {
        let row = entity::Entity::find_by_id(user_id).one(self.db.as_ref()).await?;
        row.map(|m| decode(m.settings)).transpose()
    }

    async fn update(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome, RepoError> {
        let blob = encode(settings)?;
        let res = entity::Entity::update_many()
            .col_expr(entity::Column::Settings, Expr::value(blob))
            .col_expr(entity::Column::UpdatedAt, Expr::value(updated_at))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        if res.rows_affected == 0 {
            Ok(UpdateOutcome::NoRow)
        } else {
            Ok(UpdateOutcome::Updated)
        }
    }

    async fn insert(
        &self,
        user_id: Uuid,
        settings: &UserSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let blob = encode(settings)?;
        let model = entity::ActiveModel {
            user_id: Set(user_id),
            settings: Set(blob),
            updated_at: Set(updated_at),
        };
        entity::Entity::insert(model).exec(self.db.as_ref()).await?;
        Ok(())
    }
}
