use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{
    NewSalaryPayment, NewSalaryPlayer, NewStaffMember, NewStaffPayment, PlayerSalary,
    SalaryPayment, SalaryPlayer, StaffMember, StaffPatch, StaffPayment,
};
use crate::domain::error::DomainError;

/// Storage port for staff and salaried players.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    // Staff.
    async fn insert_staff(&self, new: NewStaffMember) -> Result<StaffMember, DomainError>;
    async fn update_staff(&self, id: Uuid, patch: StaffPatch) -> Result<StaffMember, DomainError>;
    async fn list_staff(&self) -> Result<Vec<StaffMember>, DomainError>;
    async fn get_staff(&self, id: Uuid) -> Result<Option<StaffMember>, DomainError>;
    async fn delete_staff(&self, id: Uuid) -> Result<bool, DomainError>;

    // Staff payments.
    async fn insert_staff_payment(
        &self,
        new: NewStaffPayment,
        receipt_number: String,
    ) -> Result<StaffPayment, DomainError>;
    async fn list_staff_payments(&self, staff_id: Uuid)
        -> Result<Vec<StaffPayment>, DomainError>;

    // Salaried players.
    async fn insert_salary_player(&self, new: NewSalaryPlayer)
        -> Result<SalaryPlayer, DomainError>;
    async fn list_salary_players(&self) -> Result<Vec<SalaryPlayer>, DomainError>;
    async fn get_salary_player(&self, id: Uuid) -> Result<Option<SalaryPlayer>, DomainError>;
    async fn delete_salary_player(&self, id: Uuid) -> Result<bool, DomainError>;

    // Salary revisions; newest row wins.
    async fn insert_salary(&self, player_id: Uuid, salary: i64)
        -> Result<PlayerSalary, DomainError>;
    async fn current_salary(&self, player_id: Uuid) -> Result<Option<PlayerSalary>, DomainError>;

    // Salary payments.
    async fn insert_salary_payment(
        &self,
        new: NewSalaryPayment,
        receipt_number: String,
    ) -> Result<SalaryPayment, DomainError>;
    async fn list_salary_payments(
        &self,
        player_id: Uuid,
    ) -> Result<Vec<SalaryPayment>, DomainError>;
}
