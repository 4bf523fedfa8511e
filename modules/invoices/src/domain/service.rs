use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::contract::model::{Invoice, InvoiceItem, NewInvoice};
use crate::domain::error::DomainError;
use crate::domain::repo::InvoicesRepository;

/// Tax on the subtotal, in minor units, rounded half-up.
fn tax_amount(subtotal: i64, tax_rate: i64) -> i64 {
    (subtotal * tax_rate + 50) / 100
}

/// Next number in the per-year sequence, e.g. "FAC-2025-0003".
fn next_number(year: i32, last: Option<&str>) -> String {
    let seq = last
        .and_then(|n| n.rsplit('-').next())
        .and_then(|s| s.parse::<u32>().ok())
        .map_or(1, |n| n + 1);
    format!("FAC-{year}-{seq:04}")
}

pub struct InvoicesService {
    repo: Arc<dyn InvoicesRepository>,
}

impl InvoicesService {
    pub fn new(repo: Arc<dyn InvoicesRepository>) -> Self {
        Self { repo }
    }

    /// Create an invoice. All money fields are computed here from the
    /// line quantities and unit prices; client-supplied totals are never
    /// accepted.
    #[instrument(skip(self, new), fields(client = %new.client_name))]
    pub async fn create(&self, new: NewInvoice) -> Result<Invoice, DomainError> {
        if new.client_name.trim().is_empty() {
            return Err(DomainError::validation("client_name", "must not be empty"));
        }
        if new.items.is_empty() {
            return Err(DomainError::validation("items", "must not be empty"));
        }
        if !(0..=100).contains(&new.tax_rate) {
            return Err(DomainError::validation("tax_rate", "must be 0..=100"));
        }
        for item in &new.items {
            if item.quantity <= 0 {
                return Err(DomainError::validation("quantity", "must be positive"));
            }
            if item.price < 0 {
                return Err(DomainError::validation("price", "must not be negative"));
            }
        }

        let items: Vec<InvoiceItem> = new
            .items
            .into_iter()
            .map(|i| InvoiceItem {
                amount: i.quantity * i.price,
                description: i.description,
                quantity: i.quantity,
                price: i.price,
            })
            .collect();
        let subtotal: i64 = items.iter().map(|i| i.amount).sum();
        let tax = tax_amount(subtotal, new.tax_rate);

        let year = new.date.year();
        let prefix = format!("FAC-{year}-");
        let last = self.repo.max_number_with_prefix(&prefix).await?;
        let number = next_number(year, last.as_deref());

        let invoice = Invoice {
            id: Uuid::new_v4(),
            number,
            date: new.date,
            client_name: new.client_name,
            client_nif: new.client_nif,
            client_address: new.client_address,
            items,
            subtotal,
            tax_rate: new.tax_rate,
            tax_amount: tax,
            total: subtotal + tax,
            notes: new.notes,
            created_at: Utc::now(),
        };
        let stored = self.repo.insert(invoice).await?;
        info!(number = %stored.number, total = stored.total, "invoice created");
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Invoice, DomainError> {
        self.repo
            .get(id)
            .await?
            .ok_or(DomainError::NotFound { id })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound { id })
        }
    }
}
