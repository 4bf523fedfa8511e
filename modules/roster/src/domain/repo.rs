use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{NewPayment, NewPlayer, Payment, Player, PlayerPatch, Team};
use crate::domain::error::DomainError;

/// Storage port for teams, players and fee payments.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    // Teams.
    async fn insert_team(&self, name: String) -> Result<Team, DomainError>;
    async fn rename_team(&self, id: Uuid, name: String) -> Result<Team, DomainError>;
    async fn list_teams(&self) -> Result<Vec<Team>, DomainError>;
    async fn get_team(&self, id: Uuid) -> Result<Option<Team>, DomainError>;
    async fn delete_team(&self, id: Uuid) -> Result<bool, DomainError>;

    // Players.
    async fn insert_player(&self, new: NewPlayer) -> Result<Player, DomainError>;
    async fn update_player(&self, id: Uuid, patch: PlayerPatch) -> Result<Player, DomainError>;
    async fn list_players_by_team(&self, team_id: Uuid) -> Result<Vec<Player>, DomainError>;
    async fn list_players(&self) -> Result<Vec<Player>, DomainError>;
    async fn get_player(&self, id: Uuid) -> Result<Option<Player>, DomainError>;
    async fn delete_player(&self, id: Uuid) -> Result<bool, DomainError>;

    // Payments. Inserting the row and bumping the player's `paid_amount`
    // happen in one transaction.
    async fn record_payment(
        &self,
        new: NewPayment,
        receipt_number: String,
    ) -> Result<Payment, DomainError>;
    async fn list_payments(&self, player_id: Uuid) -> Result<Vec<Payment>, DomainError>;
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, DomainError>;
}
