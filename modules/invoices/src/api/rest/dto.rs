use chrono::NaiveDate;
use serde::Deserialize;

use crate::contract::model::{NewInvoice, NewInvoiceItem};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceItemRequest {
    pub description: String,
    pub quantity: i64,
    /// Unit price in minor units.
    pub price: i64,
}

/// Create-invoice body. Totals are computed server-side; there are no
/// amount fields to supply.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInvoiceRequest {
    pub date: NaiveDate,
    pub client_name: String,
    pub client_nif: Option<String>,
    pub client_address: Option<String>,
    pub items: Vec<InvoiceItemRequest>,
    /// Tax percentage, e.g. 21.
    pub tax_rate: i64,
    pub notes: Option<String>,
}

impl From<CreateInvoiceRequest> for NewInvoice {
    fn from(r: CreateInvoiceRequest) -> Self {
        Self {
            date: r.date,
            client_name: r.client_name,
            client_nif: r.client_nif,
            client_address: r.client_address,
            items: r
                .items
                .into_iter()
                .map(|i| NewInvoiceItem {
                    description: i.description,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
            tax_rate: r.tax_rate,
            notes: r.notes,
        }
    }
}
