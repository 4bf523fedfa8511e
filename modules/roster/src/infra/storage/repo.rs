use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{
    NewPayment, NewPlayer, Payment, PaymentMethod, Player, PlayerPatch, Team,
};
use crate::domain::error::DomainError;
use crate::domain::repo::RosterRepository;
use crate::infra::storage::entities::{payment, player, team};

pub struct SeaOrmRosterRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmRosterRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn team_model(m: team::Model) -> Team {
    Team {
        id: m.id,
        name: m.name,
        created_at: m.created_at,
    }
}

fn player_model(m: player::Model) -> Player {
    Player {
        id: m.id,
        team_id: m.team_id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        total_fee: m.total_fee,
        paid_amount: m.paid_amount,
        created_at: m.created_at,
    }
}

fn method_to_str(m: PaymentMethod) -> &'static str {
    match m {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Transfer => "transfer",
    }
}

fn method_from_str(s: &str) -> Result<PaymentMethod, DomainError> {
    match s {
        "cash" => Ok(PaymentMethod::Cash),
        "transfer" => Ok(PaymentMethod::Transfer),
        other => Err(DomainError::database(format!(
            "unknown payment method '{other}' in storage"
        ))),
    }
}

fn payment_model(m: payment::Model) -> Result<Payment, DomainError> {
    Ok(Payment {
        id: m.id,
        player_id: m.player_id,
        amount: m.amount,
        payment_date: m.payment_date,
        receipt_number: m.receipt_number,
        payment_method: method_from_str(&m.payment_method)?,
        notes: m.notes,
        created_at: m.created_at,
    })
}

#[async_trait]
impl RosterRepository for SeaOrmRosterRepository {
    async fn insert_team(&self, name: String) -> Result<Team, DomainError> {
        let model = team::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(Utc::now()),
        };
        Ok(team_model(model.insert(self.db.as_ref()).await?))
    }

    async fn rename_team(&self, id: Uuid, name: String) -> Result<Team, DomainError> {
        let model = team::ActiveModel {
            id: Set(id),
            name: Set(name),
            ..Default::default()
        };
        match model.update(self.db.as_ref()).await {
            Ok(updated) => Ok(team_model(updated)),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(DomainError::TeamNotFound { id }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
        let rows = team::Entity::find()
            .order_by_asc(team::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(team_model).collect())
    }

    async fn get_team(&self, id: Uuid) -> Result<Option<Team>, DomainError> {
        let row = team::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(row.map(team_model))
    }

    async fn delete_team(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = team::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_player(&self, new: NewPlayer) -> Result<Player, DomainError> {
        let model = player::ActiveModel {
            id: Set(Uuid::new_v4()),
            team_id: Set(new.team_id),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            total_fee: Set(new.total_fee),
            paid_amount: Set(0),
            created_at: Set(Utc::now()),
        };
        Ok(player_model(model.insert(self.db.as_ref()).await?))
    }

    async fn update_player(&self, id: Uuid, patch: PlayerPatch) -> Result<Player, DomainError> {
        let mut model = player::ActiveModel {
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
        if let Some(total_fee) = patch.total_fee {
            model.total_fee = Set(total_fee);
        }
        match model.update(self.db.as_ref()).await {
            Ok(updated) => Ok(player_model(updated)),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(DomainError::PlayerNotFound { id }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_players_by_team(&self, team_id: Uuid) -> Result<Vec<Player>, DomainError> {
        let rows = player::Entity::find()
            .filter(player::Column::TeamId.eq(team_id))
            .order_by_asc(player::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(player_model).collect())
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        let rows = player::Entity::find().all(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(player_model).collect())
    }

    async fn get_player(&self, id: Uuid) -> Result<Option<Player>, DomainError> {
        let row = player::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(row.map(player_model))
    }

    async fn delete_player(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = player::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn record_payment(
        &self,
        new: NewPayment,
        receipt_number: String,
    ) -> Result<Payment, DomainError> {
        let txn = self.db.begin().await?;

        let model = payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            player_id: Set(new.player_id),
            amount: Set(new.amount),
            payment_date: Set(new.payment_date),
            receipt_number: Set(receipt_number),
            payment_method: Set(method_to_str(new.payment_method).to_string()),
            notes: Set(new.notes),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&txn).await?;

        let bumped = player::Entity::update_many()
            .col_expr(
                player::Column::PaidAmount,
                Expr::col(player::Column::PaidAmount).add(new.amount),
            )
            .filter(player::Column::Id.eq(new.player_id))
            .exec(&txn)
            .await?;
        if bumped.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::PlayerNotFound { id: new.player_id });
        }

        txn.commit().await?;
        payment_model(inserted)
    }

    async fn list_payments(&self, player_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        let rows = payment::Entity::find()
            .filter(payment::Column::PlayerId.eq(player_id))
            .order_by_desc(payment::Column::PaymentDate)
            .all(self.db.as_ref())
            .await?;
        rows.into_iter().map(payment_model).collect()
    }

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let row = payment::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        row.map(payment_model).transpose()
    }
}
