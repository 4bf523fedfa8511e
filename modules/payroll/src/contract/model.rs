use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Club staff member. `salary` is the monthly amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: i64,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaffMember {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: i64,
    pub team_id: Option<Uuid>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub position: Option<String>,
    pub salary: Option<i64>,
    pub team_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffPayment {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub receipt_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaffPayment {
    pub staff_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

/// A player paid by the club (separate roster from the fee-paying one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPlayer {
    pub id: Uuid,
    pub name: String,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalaryPlayer {
    pub name: String,
    pub team_id: Option<Uuid>,
}

/// One salary revision; the newest row is the current salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSalary {
    pub id: Uuid,
    pub player_id: Uuid,
    pub salary: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPayment {
    pub id: Uuid,
    pub player_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub receipt_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated payroll figures for one month. All money is in minor units;
/// a member counts as paid once the month's payments cover the salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStats {
    pub total_members: u32,
    pub paid_members: u32,
    pub pending_members: u32,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub pending_amount: i64,
    pub average_salary: i64,
    pub monthly_comparison: MonthlyComparison,
    pub teams: Vec<TeamSalaryStats>,
}

/// Paid totals of the stats month against the month before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    pub current_month: i64,
    pub previous_month: i64,
    pub percentage_change: f64,
}

/// Per-team slice of the monthly stats. Players without a team are counted
/// in the totals but not broken out here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSalaryStats {
    pub team_id: Uuid,
    pub total_members: u32,
    pub paid_amount: i64,
    pub pending_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalaryPayment {
    pub player_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    /// Recipient of the payment-received notification, if any.
    pub notify_user_id: Option<Uuid>,
}
