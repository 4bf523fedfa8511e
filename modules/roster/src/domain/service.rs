use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use mailer::{templates, EmailClient, EmailMessage};
use notifications::domain::messages;
use notifications::NotificationsApi;

use crate::contract::model::{
    NewPayment, NewPlayer, Payment, Player, PlayerPatch, Team, TeamFeeSummary,
};
use crate::domain::error::DomainError;
use crate::domain::repo::RosterRepository;

/// Receipt numbers follow the original scheme: "REC-" + epoch millis.
fn receipt_number() -> String {
    format!("REC-{}", Utc::now().timestamp_millis())
}

/// Outcome of a receipt-email request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptEmailOutcome {
    Sent,
    /// Player has no email address; skipped with a warning.
    NoEmailAddress,
    /// No mailer configured for this deployment; skipped with a warning.
    MailerUnconfigured,
}

pub struct RosterService {
    repo: Arc<dyn RosterRepository>,
    notifications: Arc<dyn NotificationsApi>,
    mailer: Option<Arc<EmailClient>>,
}

impl RosterService {
    pub fn new(
        repo: Arc<dyn RosterRepository>,
        notifications: Arc<dyn NotificationsApi>,
        mailer: Option<Arc<EmailClient>>,
    ) -> Self {
        Self {
            repo,
            notifications,
            mailer,
        }
    }

    // ---- teams ----

    pub async fn create_team(&self, name: String) -> Result<Team, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        self.repo.insert_team(name).await
    }

    pub async fn rename_team(&self, id: Uuid, name: String) -> Result<Team, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        self.repo.rename_team(id, name).await
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
        self.repo.list_teams().await
    }

    pub async fn get_team(&self, id: Uuid) -> Result<Team, DomainError> {
        self.repo
            .get_team(id)
            .await?
            .ok_or(DomainError::TeamNotFound { id })
    }

    pub async fn delete_team(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete_team(id).await? {
            Ok(())
        } else {
            Err(DomainError::TeamNotFound { id })
        }
    }

    // ---- players ----

    pub async fn create_player(&self, new: NewPlayer) -> Result<Player, DomainError> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if new.total_fee < 0 {
            return Err(DomainError::validation("total_fee", "must not be negative"));
        }
        self.get_team(new.team_id).await?;
        self.repo.insert_player(new).await
    }

    pub async fn update_player(
        &self,
        id: Uuid,
        patch: PlayerPatch,
    ) -> Result<Player, DomainError> {
        if let Some(total_fee) = patch.total_fee {
            if total_fee < 0 {
                return Err(DomainError::validation("total_fee", "must not be negative"));
            }
        }
        self.repo.update_player(id, patch).await
    }

    pub async fn list_players_by_team(&self, team_id: Uuid) -> Result<Vec<Player>, DomainError> {
        self.repo.list_players_by_team(team_id).await
    }

    pub async fn get_player(&self, id: Uuid) -> Result<Player, DomainError> {
        self.repo
            .get_player(id)
            .await?
            .ok_or(DomainError::PlayerNotFound { id })
    }

    pub async fn delete_player(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete_player(id).await? {
            Ok(())
        } else {
            Err(DomainError::PlayerNotFound { id })
        }
    }

    // ---- payments ----

    /// Record a fee payment. The payment row and the player's stored
    /// `paid_amount` aggregate move together in one repository
    /// transaction; the payment-received notification follows and never
    /// undoes the payment.
    #[instrument(skip(self, new), fields(player_id = %new.player_id, amount = new.amount))]
    pub async fn record_payment(&self, new: NewPayment) -> Result<Payment, DomainError> {
        if new.amount <= 0 {
            return Err(DomainError::validation("amount", "must be positive"));
        }
        let player = self.get_player(new.player_id).await?;
        let notify_user_id = new.notify_user_id;

        let payment = self.repo.record_payment(new, receipt_number()).await?;
        info!(receipt = %payment.receipt_number, "fee payment recorded");

        if let Some(user_id) = notify_user_id {
            let note = messages::payment_received(user_id, &player.name, payment.amount);
            if let Err(e) = self.notifications.notify(note).await {
                warn!(error = %e, "payment recorded but notification failed");
            }
        }
        Ok(payment)
    }

    pub async fn list_payments(&self, player_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        self.repo.list_payments(player_id).await
    }

    /// Email the receipt for a payment to the player's address.
    pub async fn send_receipt_email(
        &self,
        player_id: Uuid,
        payment_id: Uuid,
    ) -> Result<ReceiptEmailOutcome, DomainError> {
        let player = self.get_player(player_id).await?;
        let payment = self
            .repo
            .get_payment(payment_id)
            .await?
            .filter(|p| p.player_id == player_id)
            .ok_or(DomainError::PaymentNotFound { id: payment_id })?;

        let Some(client) = &self.mailer else {
            warn!(%player_id, "receipt email skipped: no mailer configured");
            return Ok(ReceiptEmailOutcome::MailerUnconfigured);
        };
        let Some(address) = &player.email else {
            warn!(%player_id, "receipt email skipped: player has no email address");
            return Ok(ReceiptEmailOutcome::NoEmailAddress);
        };

        let html = templates::receipt_email_html(
            &player.name,
            &payment.receipt_number,
            payment.amount,
            payment.payment_date,
        );
        let message = EmailMessage {
            to: address.clone(),
            from: client.default_from().to_string(),
            subject: format!("Recibo de pago - {}", payment.receipt_number),
            html,
            cc: None,
            attachment: None,
        };
        client
            .send(&message)
            .await
            .map_err(|e| DomainError::email(e.to_string()))?;
        info!(%player_id, receipt = %payment.receipt_number, "receipt email sent");
        Ok(ReceiptEmailOutcome::Sent)
    }

    // ---- fees ----

    /// Per-team fee totals over all players.
    pub async fn fee_summary(&self) -> Result<Vec<TeamFeeSummary>, DomainError> {
        let teams = self.repo.list_teams().await?;
        let players = self.repo.list_players().await?;

        let mut by_team: HashMap<Uuid, (i64, i64)> = HashMap::new();
        for p in &players {
            let entry = by_team.entry(p.team_id).or_default();
            entry.0 += p.total_fee;
            entry.1 += p.paid_amount;
        }

        Ok(teams
            .into_iter()
            .map(|t| {
                let (total_fee, total_paid) = by_team.get(&t.id).copied().unwrap_or((0, 0));
                TeamFeeSummary {
                    team_id: t.id,
                    team_name: t.name,
                    total_fee,
                    total_paid,
                    pending: total_fee - total_paid,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use notifications::{NewNotification, Notification};
    use std::sync::Mutex;

    use crate::contract::model::PaymentMethod;

    #[derive(Default)]
    struct MemoryRepo {
        teams: Mutex<Vec<Team>>,
        players: Mutex<Vec<Player>>,
        payments: Mutex<Vec<Payment>>,
    }

    #[async_trait]
    impl RosterRepository for MemoryRepo {
        async fn insert_team(&self, name: String) -> Result<Team, DomainError> {
            let t = Team {
                id: Uuid::new_v4(),
                name,
                created_at: Utc::now(),
            };
            self.teams.lock().unwrap().push(t.clone());
            Ok(t)
        }

        async fn rename_team(&self, id: Uuid, name: String) -> Result<Team, DomainError> {
            let mut teams = self.teams.lock().unwrap();
            let t = teams
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(DomainError::TeamNotFound { id })?;
            t.name = name;
            Ok(t.clone())
        }

        async fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
            Ok(self.teams.lock().unwrap().clone())
        }

        async fn get_team(&self, id: Uuid) -> Result<Option<Team>, DomainError> {
            Ok(self.teams.lock().unwrap().iter().find(|t| t.id == id).cloned())
        }

        async fn delete_team(&self, id: Uuid) -> Result<bool, DomainError> {
            let mut teams = self.teams.lock().unwrap();
            let before = teams.len();
            teams.retain(|t| t.id != id);
            Ok(teams.len() < before)
        }

        async fn insert_player(&self, new: NewPlayer) -> Result<Player, DomainError> {
            let p = Player {
                id: Uuid::new_v4(),
                team_id: new.team_id,
                name: new.name,
                email: new.email,
                phone: new.phone,
                total_fee: new.total_fee,
                paid_amount: 0,
                created_at: Utc::now(),
            };
            self.players.lock().unwrap().push(p.clone());
            Ok(p)
        }

        async fn update_player(
            &self,
            id: Uuid,
            patch: PlayerPatch,
        ) -> Result<Player, DomainError> {
            let mut players = self.players.lock().unwrap();
            let p = players
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(DomainError::PlayerNotFound { id })?;
            if let Some(name) = patch.name {
                p.name = name;
            }
            if let Some(email) = patch.email {
                p.email = email;
            }
            if let Some(phone) = patch.phone {
                p.phone = phone;
            }
            if let Some(total_fee) = patch.total_fee {
                p.total_fee = total_fee;
            }
            Ok(p.clone())
        }

        async fn list_players_by_team(&self, team_id: Uuid) -> Result<Vec<Player>, DomainError> {
            Ok(self
                .players
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.team_id == team_id)
                .cloned()
                .collect())
        }

        async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
            Ok(self.players.lock().unwrap().clone())
        }

        async fn get_player(&self, id: Uuid) -> Result<Option<Player>, DomainError> {
            Ok(self.players.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn delete_player(&self, id: Uuid) -> Result<bool, DomainError> {
            let mut players = self.players.lock().unwrap();
            let before = players.len();
            players.retain(|p| p.id != id);
            Ok(players.len() < before)
        }

        async fn record_payment(
            &self,
            new: NewPayment,
            receipt_number: String,
        ) -> Result<Payment, DomainError> {
            let mut players = self.players.lock().unwrap();
            let player = players
                .iter_mut()
                .find(|p| p.id == new.player_id)
                .ok_or(DomainError::PlayerNotFound { id: new.player_id })?;
            player.paid_amount += new.amount;

            let p = Payment {
                id: Uuid::new_v4(),
                player_id: new.player_id,
                amount: new.amount,
                payment_date: new.payment_date,
                receipt_number,
                payment_method: new.payment_method,
                notes: new.notes,
                created_at: Utc::now(),
            };
            self.payments.lock().unwrap().push(p.clone());
            Ok(p)
        }

        async fn list_payments(&self, player_id: Uuid) -> Result<Vec<Payment>, DomainError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.player_id == player_id)
                .cloned()
                .collect())
        }

        async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
            Ok(self.payments.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<NewNotification>>,
    }

    #[async_trait]
    impl NotificationsApi for RecordingNotifier {
        async fn notify(&self, new: NewNotification) -> anyhow::Result<Notification> {
            self.sent.lock().unwrap().push(new.clone());
            Ok(Notification {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                kind: new.kind,
                title: new.title,
                message: new.message,
                read: false,
                created_at: Utc::now(),
            })
        }
    }

    fn service() -> (RosterService, Arc<MemoryRepo>, Arc<RecordingNotifier>) {
        let repo = Arc::new(MemoryRepo::default());
        let notifier = Arc::new(RecordingNotifier::default());
        (
            RosterService::new(repo.clone(), notifier.clone(), None),
            repo,
            notifier,
        )
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn player_in_team(service: &RosterService, fee: i64) -> Player {
        let team = service.create_team("Cadete A".to_string()).await.unwrap();
        service
            .create_player(NewPlayer {
                team_id: team.id,
                name: "Ana".to_string(),
                email: Some("ana@example.com".to_string()),
                phone: None,
                total_fee: fee,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn payment_bumps_paid_amount_and_notifies() {
        let (service, _, notifier) = service();
        let admin = Uuid::new_v4();
        let player = player_in_team(&service, 30000).await;

        service
            .record_payment(NewPayment {
                player_id: player.id,
                amount: 10000,
                payment_date: d(2025, 3, 5),
                payment_method: PaymentMethod::Cash,
                notes: None,
                notify_user_id: Some(admin),
            })
            .await
            .unwrap();

        let updated = service.get_player(player.id).await.unwrap();
        assert_eq!(updated.paid_amount, 10000);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Pago Recibido");
        assert_eq!(sent[0].message, "Se ha registrado un pago de 100.00€ de Ana");
    }

    #[tokio::test]
    async fn payment_for_unknown_player_is_rejected() {
        let (service, _, _) = service();
        let err = service
            .record_payment(NewPayment {
                player_id: Uuid::new_v4(),
                amount: 100,
                payment_date: d(2025, 3, 5),
                payment_method: PaymentMethod::Transfer,
                notes: None,
                notify_user_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PlayerNotFound { .. }));
    }

    #[tokio::test]
    async fn player_requires_existing_team() {
        let (service, _, _) = service();
        let err = service
            .create_player(NewPlayer {
                team_id: Uuid::new_v4(),
                name: "Ana".to_string(),
                email: None,
                phone: None,
                total_fee: 100,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::TeamNotFound { .. }));
    }

    #[tokio::test]
    async fn fee_summary_groups_by_team() {
        let (service, _, _) = service();
        let a = service.create_team("A".to_string()).await.unwrap();
        let b = service.create_team("B".to_string()).await.unwrap();
        for (team, fee) in [(a.id, 10000), (a.id, 20000), (b.id, 5000)] {
            let p = service
                .create_player(NewPlayer {
                    team_id: team,
                    name: "p".to_string(),
                    email: None,
                    phone: None,
                    total_fee: fee,
                })
                .await
                .unwrap();
            service
                .record_payment(NewPayment {
                    player_id: p.id,
                    amount: 1000,
                    payment_date: d(2025, 3, 5),
                    payment_method: PaymentMethod::Cash,
                    notes: None,
                    notify_user_id: None,
                })
                .await
                .unwrap();
        }

        let summary = service.fee_summary().await.unwrap();
        let a_row = summary.iter().find(|s| s.team_id == a.id).unwrap();
        assert_eq!(a_row.total_fee, 30000);
        assert_eq!(a_row.total_paid, 2000);
        assert_eq!(a_row.pending, 28000);
        let b_row = summary.iter().find(|s| s.team_id == b.id).unwrap();
        assert_eq!(b_row.pending, 4000);
    }

    #[tokio::test]
    async fn receipt_email_without_mailer_is_a_noop() {
        let (service, _, _) = service();
        let player = player_in_team(&service, 30000).await;
        let payment = service
            .record_payment(NewPayment {
                player_id: player.id,
                amount: 100,
                payment_date: d(2025, 3, 5),
                payment_method: PaymentMethod::Cash,
                notes: None,
                notify_user_id: None,
            })
            .await
            .unwrap();

        let outcome = service
            .send_receipt_email(player.id, payment.id)
            .await
            .unwrap();
        assert_eq!(outcome, ReceiptEmailOutcome::MailerUnconfigured);
    }

    #[tokio::test]
    async fn receipt_email_rejects_mismatched_payment() {
        let (service, _, _) = service();
        let player = player_in_team(&service, 30000).await;

        let err = service
            .send_receipt_email(player.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PaymentNotFound { .. }));
    }
}
