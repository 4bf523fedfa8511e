use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::contract::model::{
    NewSalaryPayment, NewSalaryPlayer, NewStaffMember, NewStaffPayment, PlayerSalary,
    SalaryPayment, SalaryPlayer, StaffMember, StaffPatch, StaffPayment,
};
use crate::domain::error::DomainError;
use crate::domain::repo::PayrollRepository;
use crate::infra::storage::entities::{
    player_salary, salary_payment, salary_player, staff, staff_payment,
};

pub struct SeaOrmPayrollRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPayrollRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn staff_model(m: staff::Model) -> StaffMember {
    StaffMember {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        position: m.position,
        salary: m.salary,
        team_id: m.team_id,
        created_at: m.created_at,
    }
}

fn staff_payment_model(m: staff_payment::Model) -> StaffPayment {
    StaffPayment {
        id: m.id,
        staff_id: m.staff_id,
        amount: m.amount,
        payment_date: m.payment_date,
        receipt_number: m.receipt_number,
        notes: m.notes,
        created_at: m.created_at,
    }
}

fn salary_player_model(m: salary_player::Model) -> SalaryPlayer {
    SalaryPlayer {
        id: m.id,
        name: m.name,
        team_id: m.team_id,
        created_at: m.created_at,
    }
}

fn player_salary_model(m: player_salary::Model) -> PlayerSalary {
    PlayerSalary {
        id: m.id,
        player_id: m.player_id,
        salary: m.salary,
        created_at: m.created_at,
    }
}

fn salary_payment_model(m: salary_payment::Model) -> SalaryPayment {
    SalaryPayment {
        id: m.id,
        player_id: m.player_id,
        amount: m.amount,
        payment_date: m.payment_date,
        receipt_number: m.receipt_number,
        notes: m.notes,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PayrollRepository for SeaOrmPayrollRepository {
    async fn insert_staff(&self, new: NewStaffMember) -> Result<StaffMember, DomainError> {
        let model = staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            position: Set(new.position),
            salary: Set(new.salary),
            team_id: Set(new.team_id),
            created_at: Set(Utc::now()),
        };
        Ok(staff_model(model.insert(self.db.as_ref()).await?))
    }

    async fn update_staff(&self, id: Uuid, patch: StaffPatch) -> Result<StaffMember, DomainError> {
        let mut model = staff::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(email) = patch.email {
            model.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            model.phone = Set(phone);
        }
        if let Some(position) = patch.position {
            model.position = Set(position);
        }
        if let Some(salary) = patch.salary {
            model.salary = Set(salary);
        }
        if let Some(team_id) = patch.team_id {
            model.team_id = Set(team_id);
        }
        match model.update(self.db.as_ref()).await {
            Ok(updated) => Ok(staff_model(updated)),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(DomainError::staff_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>, DomainError> {
        let rows = staff::Entity::find()
            .order_by_asc(staff::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(staff_model).collect())
    }

    async fn get_staff(&self, id: Uuid) -> Result<Option<StaffMember>, DomainError> {
        let row = staff::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(row.map(staff_model))
    }

    async fn delete_staff(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = staff::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_staff_payment(
        &self,
        new: NewStaffPayment,
        receipt_number: String,
    ) -> Result<StaffPayment, DomainError> {
        let model = staff_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            staff_id: Set(new.staff_id),
            amount: Set(new.amount),
            payment_date: Set(new.payment_date),
            receipt_number: Set(receipt_number),
            notes: Set(new.notes),
            created_at: Set(Utc::now()),
        };
        Ok(staff_payment_model(model.insert(self.db.as_ref()).await?))
    }

    async fn list_staff_payments(
        &self,
        staff_id: Uuid,
    ) -> Result<Vec<StaffPayment>, DomainError> {
        let rows = staff_payment::Entity::find()
            .filter(staff_payment::Column::StaffId.eq(staff_id))
            .order_by_desc(staff_payment::Column::PaymentDate)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(staff_payment_model).collect())
    }

    async fn insert_salary_player(
        &self,
        new: NewSalaryPlayer,
    ) -> Result<SalaryPlayer, DomainError> {
        let model = salary_player::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            team_id: Set(new.team_id),
            created_at: Set(Utc::now()),
        };
        Ok(salary_player_model(model.insert(self.db.as_ref()).await?))
    }

    async fn list_salary_players(&self) -> Result<Vec<SalaryPlayer>, DomainError> {
        let rows = salary_player::Entity::find()
            .order_by_asc(salary_player::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(salary_player_model).collect())
    }

    async fn get_salary_player(&self, id: Uuid) -> Result<Option<SalaryPlayer>, DomainError> {
        let row = salary_player::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(salary_player_model))
    }

    async fn delete_salary_player(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = salary_player::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_salary(
        &self,
        player_id: Uuid,
        salary: i64,
    ) -> Result<PlayerSalary, DomainError> {
        let model = player_salary::ActiveModel {
            id: Set(Uuid::new_v4()),
            player_id: Set(player_id),
            salary: Set(salary),
            created_at: Set(Utc::now()),
        };
        Ok(player_salary_model(model.insert(self.db.as_ref()).await?))
    }

    async fn current_salary(&self, player_id: Uuid) -> Result<Option<PlayerSalary>, DomainError> {
        let row = player_salary::Entity::find()
            .filter(player_salary::Column::PlayerId.eq(player_id))
            .order_by_desc(player_salary::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(player_salary_model))
    }

    async fn insert_salary_payment(
        &self,
        new: NewSalaryPayment,
        receipt_number: String,
    ) -> Result<SalaryPayment, DomainError> {
        let model = salary_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            player_id: Set(new.player_id),
            amount: Set(new.amount),
            payment_date: Set(new.payment_date),
            receipt_number: Set(receipt_number),
            notes: Set(new.notes),
            created_at: Set(Utc::now()),
        };
        Ok(salary_payment_model(model.insert(self.db.as_ref()).await?))
    }

    async fn list_salary_payments(
        &self,
        player_id: Uuid,
    ) -> Result<Vec<SalaryPayment>, DomainError> {
        let rows = salary_payment::Entity::find()
            .filter(salary_payment::Column::PlayerId.eq(player_id))
            .order_by_desc(salary_payment::Column::PaymentDate)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(salary_payment_model).collect())
    }
}
