use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::contract::model::{Invoice, InvoiceItem};
use crate::domain::error::DomainError;
use crate::domain::repo::InvoicesRepository;
use crate::infra::storage::entities::invoice;

pub struct SeaOrmInvoicesRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmInvoicesRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn decode_items(raw: serde_json::Value) -> Result<Vec<InvoiceItem>, DomainError> {
    serde_json::from_value(raw)
        .map_err(|e| DomainError::database(format!("corrupt invoice items: {e}")))
}

fn invoice_model(m: invoice::Model) -> Result<Invoice, DomainError> {
    Ok(Invoice {
        id: m.id,
        number: m.number,
        date: m.date,
        client_name: m.client_name,
        client_nif: m.client_nif,
        client_address: m.client_address,
        items: decode_items(m.items)?,
        subtotal: m.subtotal,
        tax_rate: m.tax_rate,
        tax_amount: m.tax_amount,
        total: m.total,
        notes: m.notes,
        created_at: m.created_at,
    })
}

#[async_trait]
impl InvoicesRepository for SeaOrmInvoicesRepository {
    async fn insert(&self, inv: Invoice) -> Result<Invoice, DomainError> {
        let items = serde_json::to_value(&inv.items)
            .map_err(|e| DomainError::database(format!("unencodable invoice items: {e}")))?;
        let model = invoice::ActiveModel {
            id: Set(inv.id),
            number: Set(inv.number.clone()),
            date: Set(inv.date),
            client_name: Set(inv.client_name.clone()),
            client_nif: Set(inv.client_nif.clone()),
            client_address: Set(inv.client_address.clone()),
            items: Set(items),
            subtotal: Set(inv.subtotal),
            tax_rate: Set(inv.tax_rate),
            tax_amount: Set(inv.tax_amount),
            total: Set(inv.total),
            notes: Set(inv.notes.clone()),
            created_at: Set(inv.created_at),
        };
        model.insert(self.db.as_ref()).await?;
        Ok(inv)
    }

    async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        let rows = invoice::Entity::find()
            .order_by_desc(invoice::Column::Date)
            .order_by_desc(invoice::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        rows.into_iter().map(invoice_model).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Invoice>, DomainError> {
        let row = invoice::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        row.map(invoice_model).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = invoice::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn max_number_with_prefix(&self, prefix: &str) -> Result<Option<String>, DomainError> {
        let row: Option<String> = invoice::Entity::find()
            .select_only()
            .column(invoice::Column::Number)
            .filter(invoice::Column::Number.starts_with(prefix))
            .order_by_desc(invoice::Column::Number)
            .limit(1)
            .into_tuple()
            .one(self.db.as_ref())
            .await?;
        Ok(row)
    }
}
