use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Fee-paying roster player. Monetary fields are minor units;
/// `paid_amount` is a stored aggregate maintained by `record_payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_fee: i64,
    pub paid_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub team_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_fee: i64,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub total_fee: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub player_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub receipt_number: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub player_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    /// Recipient of the payment-received notification, if any.
    pub notify_user_id: Option<Uuid>,
}

/// Per-team fee totals; `pending = total_fee − total_paid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamFeeSummary {
    pub team_id: Uuid,
    pub team_name: String,
    pub total_fee: i64,
    pub total_paid: i64,
    pub pending: i64,
}
