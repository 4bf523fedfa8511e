//! End-to-end storage tests against an in-memory SQLite database.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use settings::contract::model::{Theme, UserSettings};
use settings::domain::repo::{SettingsRepository, UpdateOutcome};
use settings::domain::service::SettingsService;
use settings::infra::storage::migrations::Migrator;
use settings::infra::storage::repo::SeaOrmSettingsRepository;

async fn repo() -> SeaOrmSettingsRepository {
    // One pooled connection, so the in-memory database is shared.
    let opts = db::ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    };
    let handle = db::DbHandle::connect("sqlite::memory:", opts).await.unwrap();
    Migrator::up(handle.seaorm(), None).await.unwrap();
    SeaOrmSettingsRepository::new(Arc::new(handle.sea()))
}

#[tokio::test]
async fn fetch_on_empty_table_returns_none() {
    let repo = repo().await;
    assert!(repo.fetch(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_without_row_reports_no_row() {
    let repo = repo().await;
    let outcome = repo
        .update(Uuid::new_v4(), &UserSettings::default(), chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::NoRow);
}

#[tokio::test]
async fn insert_then_fetch_round_trips() {
    let repo = repo().await;
    let user = Uuid::new_v4();
    let mut custom = UserSettings::default();
    custom.theme = Theme::Dark;
    custom.email.notifications.payments = false;

    repo.insert(user, &custom, chrono::Utc::now()).await.unwrap();

    assert_eq!(repo.fetch(user).await.unwrap(), Some(custom));
}

#[tokio::test]
async fn update_replaces_the_whole_blob() {
    let repo = repo().await;
    let user = Uuid::new_v4();
    repo.insert(user, &UserSettings::default(), chrono::Utc::now())
        .await
        .unwrap();

    let mut custom = UserSettings::default();
    custom.language = settings::contract::model::Language::Val;
    let outcome = repo.update(user, &custom, chrono::Utc::now()).await.unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert_eq!(repo.fetch(user).await.unwrap(), Some(custom));
}

#[tokio::test]
async fn service_save_then_load_round_trips_through_sqlite() {
    let repo = Arc::new(repo().await);
    let service = SettingsService::new(repo);
    let user = Uuid::new_v4();

    let mut custom = UserSettings::default();
    custom.email.enabled = false;
    service.save(user, &custom).await.unwrap();
    // A second save goes down the UPDATE path.
    custom.theme = Theme::Light;
    service.save(user, &custom).await.unwrap();

    assert_eq!(service.load(user).await, custom);
}
