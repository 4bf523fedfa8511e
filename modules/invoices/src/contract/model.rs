use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One invoice line. `amount = quantity × price`, computed on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: i64,
    /// Unit price in minor units.
    pub price: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    /// "FAC-{year}-{seq}", sequence per invoice-date year.
    pub number: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub client_nif: Option<String>,
    pub client_address: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: i64,
    /// Tax percentage applied to the subtotal.
    pub tax_rate: i64,
    pub tax_amount: i64,
    pub total: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoiceItem {
    pub description: String,
    pub quantity: i64,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub date: NaiveDate,
    pub client_name: String,
    pub client_nif: Option<String>,
    pub client_address: Option<String>,
    pub items: Vec<NewInvoiceItem>,
    pub tax_rate: i64,
    pub notes: Option<String>,
}
