//! Notification log tests against an in-memory SQLite database.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use notifications::domain::repo::NotificationsRepository;
use notifications::domain::service::NotificationsService;
use notifications::infra::storage::migrations::Migrator;
use notifications::infra::storage::repo::SeaOrmNotificationsRepository;
use notifications::NewNotification;

async fn repo() -> SeaOrmNotificationsRepository {
    // One pooled connection, so the in-memory database is shared.
    let opts = db::ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    };
    let handle = db::DbHandle::connect("sqlite::memory:", opts).await.unwrap();
    Migrator::up(handle.seaorm(), None).await.unwrap();
    SeaOrmNotificationsRepository::new(Arc::new(handle.sea()))
}

fn new_notification(user_id: Uuid, title: &str) -> NewNotification {
    NewNotification {
        user_id,
        kind: "payment_due".to_string(),
        title: title.to_string(),
        message: "El pago de 100.00€ para Juan vence el 31/03/2025".to_string(),
    }
}

#[tokio::test]
async fn inserted_rows_start_unread() {
    let repo = repo().await;
    let user = Uuid::new_v4();

    let created = repo.insert(new_notification(user, "Pago Pendiente")).await.unwrap();

    assert!(!created.read);
    assert_eq!(repo.unread_count(user).await.unwrap(), 1);
}

#[tokio::test]
async fn list_recent_is_newest_first_and_limited() {
    let repo = repo().await;
    let service = NotificationsService::new(Arc::new(repo));
    let user = Uuid::new_v4();

    for i in 0..15 {
        service
            .create(new_notification(user, &format!("n{i}")))
            .await
            .unwrap();
        // Distinct timestamps so ordering is deterministic.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let rows = service.list_recent(user, None).await.unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].title, "n14");
    assert_eq!(rows[9].title, "n5");

    let rows = service.list_recent(user, Some(3)).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn other_users_rows_are_invisible() {
    let repo = repo().await;
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    repo.insert(new_notification(a, "for a")).await.unwrap();

    assert!(repo.list_recent(b, 10).await.unwrap().is_empty());
    assert_eq!(repo.unread_count(b).await.unwrap(), 0);
}

#[tokio::test]
async fn mark_read_flips_the_flag_once() {
    let repo = repo().await;
    let user = Uuid::new_v4();
    let created = repo.insert(new_notification(user, "t")).await.unwrap();

    repo.mark_read(created.id).await.unwrap();

    assert_eq!(repo.unread_count(user).await.unwrap(), 0);
    let rows = repo.list_recent(user, 10).await.unwrap();
    assert!(rows[0].read);
}

#[tokio::test]
async fn mark_read_on_unknown_id_is_not_found() {
    let repo = repo().await;
    let err = repo.mark_read(Uuid::new_v4()).await.unwrap_err();
    assert!(err.to_string().contains("not found"));
}
