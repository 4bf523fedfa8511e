use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// One salaried player's current salary and full payment history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryObligation {
    pub player_id: Uuid,
    pub player_name: String,
    /// Current monthly salary in minor units.
    pub salary: i64,
    pub payments: Vec<ObligationPayment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObligationPayment {
    /// Amount in minor units.
    pub amount: i64,
    pub paid_on: NaiveDate,
}

/// Port the scanner pulls its data through. Implemented by the payroll
/// module and published on the client hub.
#[async_trait]
pub trait ObligationsSource: Send + Sync {
    async fn monthly_obligations(&self) -> anyhow::Result<Vec<SalaryObligation>>;
}
