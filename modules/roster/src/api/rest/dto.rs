use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewPayment, NewPlayer, PaymentMethod, PlayerPatch};

/// Distinguishes "field absent" (outer `None`) from "field set to null"
/// (inner `None`) in PATCH-style bodies.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(de)?))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameTeamRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Season fee in minor units.
    pub total_fee: i64,
}

impl CreatePlayerRequest {
    pub fn into_new(self, team_id: Uuid) -> NewPlayer {
        NewPlayer {
            team_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            total_fee: self.total_fee,
        }
    }
}

/// Partial update. Absent fields keep their stored value; nullable fields
/// use a nested Option so `null` clears them.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub total_fee: Option<i64>,
}

impl From<UpdatePlayerRequest> for PlayerPatch {
    fn from(r: UpdatePlayerRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            total_fee: r.total_fee,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordPaymentRequest {
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    /// Recipient of the payment-received notification, if any.
    pub notify_user_id: Option<Uuid>,
}

impl RecordPaymentRequest {
    pub fn into_new(self, player_id: Uuid) -> NewPayment {
        NewPayment {
            player_id,
            amount: self.amount,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            notes: self.notes,
            notify_user_id: self.notify_user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReceiptEmailResponse {
    pub status: &'static str,
}
