use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub client_nif: Option<String>,
    pub client_address: Option<String>,
    /// JSON array of line items.
    pub items: Json,
    pub subtotal: i64,
    pub tax_rate: i64,
    pub tax_amount: i64,
    pub total: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
