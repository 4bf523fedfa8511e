use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Distinguishes "field absent" (outer `None`) from "field set to null"
/// (inner `None`) in PATCH-style bodies.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(de)?))
}

use crate::contract::model::{
    NewSalaryPayment, NewSalaryPlayer, NewStaffMember, NewStaffPayment, StaffPatch,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateStaffRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    /// Monthly salary in minor units.
    pub salary: i64,
    pub team_id: Option<Uuid>,
}

impl From<CreateStaffRequest> for NewStaffMember {
    fn from(r: CreateStaffRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            position: r.position,
            salary: r.salary,
            team_id: r.team_id,
        }
    }
}

/// Partial update. Absent fields keep their stored value; nullable fields
/// use a nested Option so `null` clears them.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub position: Option<String>,
    pub salary: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_id: Option<Option<Uuid>>,
}

impl From<UpdateStaffRequest> for StaffPatch {
    fn from(r: UpdateStaffRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            position: r.position,
            salary: r.salary,
            team_id: r.team_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordStaffPaymentRequest {
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

impl RecordStaffPaymentRequest {
    pub fn into_new(self, staff_id: Uuid) -> NewStaffPayment {
        NewStaffPayment {
            staff_id,
            amount: self.amount,
            payment_date: self.payment_date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSalaryPlayerRequest {
    pub name: String,
    pub team_id: Option<Uuid>,
}

impl From<CreateSalaryPlayerRequest> for NewSalaryPlayer {
    fn from(r: CreateSalaryPlayerRequest) -> Self {
        Self {
            name: r.name,
            team_id: r.team_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetSalaryRequest {
    /// Monthly salary in minor units.
    pub salary: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSalaryPaymentRequest {
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    /// Recipient of the payment-received notification, if any.
    pub notify_user_id: Option<Uuid>,
}

impl RecordSalaryPaymentRequest {
    pub fn into_new(self, player_id: Uuid) -> NewSalaryPayment {
        NewSalaryPayment {
            player_id,
            amount: self.amount,
            payment_date: self.payment_date,
            notes: self.notes,
            notify_user_id: self.notify_user_id,
        }
    }
}
