//! Invoice storage tests against an in-memory SQLite database.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use invoices::contract::model::{NewInvoice, NewInvoiceItem};
use invoices::domain::repo::InvoicesRepository;
use invoices::domain::service::InvoicesService;
use invoices::infra::storage::migrations::Migrator;
use invoices::infra::storage::repo::SeaOrmInvoicesRepository;

async fn repo() -> Arc<SeaOrmInvoicesRepository> {
    // One pooled connection, so the in-memory database is shared.
    let opts = db::ConnectOpts {
        max_conns: Some(1),
        ..Default::default()
    };
    let handle = db::DbHandle::connect("sqlite::memory:", opts).await.unwrap();
    Migrator::up(handle.seaorm(), None).await.unwrap();
    Arc::new(SeaOrmInvoicesRepository::new(Arc::new(handle.sea())))
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn new_invoice(date: NaiveDate) -> NewInvoice {
    NewInvoice {
        date,
        client_name: "Ayuntamiento".to_string(),
        client_nif: Some("B12345678".to_string()),
        client_address: Some("Plaza Mayor 1".to_string()),
        items: vec![
            NewInvoiceItem {
                description: "Alquiler pista".to_string(),
                quantity: 2,
                price: 5000,
            },
            NewInvoiceItem {
                description: "Arbitraje".to_string(),
                quantity: 1,
                price: 3000,
            },
        ],
        tax_rate: 21,
        notes: None,
    }
}

#[tokio::test]
async fn invoice_round_trips_with_items() {
    let repo = repo().await;
    let service = InvoicesService::new(repo);

    let created = service.create(new_invoice(d(2025, 3, 10))).await.unwrap();
    let fetched = service.get(created.id).await.unwrap();

    assert_eq!(fetched.number, "FAC-2025-0001");
    assert_eq!(fetched.items.len(), 2);
    assert_eq!(fetched.items[0].description, "Alquiler pista");
    assert_eq!(fetched.items[0].amount, 10000);
    assert_eq!(fetched.subtotal, 13000);
    assert_eq!(fetched.tax_amount, 2730);
    assert_eq!(fetched.total, 15730);
}

#[tokio::test]
async fn sequence_survives_storage() {
    let repo = repo().await;
    let service = InvoicesService::new(repo);

    for _ in 0..3 {
        service.create(new_invoice(d(2025, 3, 10))).await.unwrap();
    }
    let third = service.create(new_invoice(d(2025, 4, 1))).await.unwrap();
    assert_eq!(third.number, "FAC-2025-0004");
}

#[tokio::test]
async fn list_is_newest_date_first() {
    let repo = repo().await;
    let service = InvoicesService::new(repo);

    service.create(new_invoice(d(2025, 1, 10))).await.unwrap();
    let newest = service.create(new_invoice(d(2025, 6, 10))).await.unwrap();
    service.create(new_invoice(d(2025, 3, 10))).await.unwrap();

    let all = service.list().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, newest.id);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let repo = repo().await;
    let service = InvoicesService::new(repo.clone());

    let created = service.create(new_invoice(d(2025, 3, 10))).await.unwrap();
    service.delete(created.id).await.unwrap();
    assert!(repo.get(created.id).await.unwrap().is_none());
    assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
}
