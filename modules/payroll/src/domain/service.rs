use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use notifications::domain::calendar::month_window;
use notifications::domain::messages;
use notifications::{NotificationsApi, ObligationPayment, SalaryObligation};

use crate::contract::model::{
    MonthlyComparison, NewSalaryPayment, NewSalaryPlayer, NewStaffMember, NewStaffPayment,
    PlayerSalary, SalaryPayment, SalaryPlayer, SalaryStats, StaffMember, StaffPatch, StaffPayment,
    TeamSalaryStats,
};
use crate::domain::error::DomainError;
use crate::domain::repo::PayrollRepository;

/// Receipt numbers follow the original scheme: "REC-" + epoch millis.
fn receipt_number() -> String {
    format!("REC-{}", Utc::now().timestamp_millis())
}

pub struct PayrollService {
    repo: Arc<dyn PayrollRepository>,
    notifications: Arc<dyn NotificationsApi>,
}

impl PayrollService {
    pub fn new(repo: Arc<dyn PayrollRepository>, notifications: Arc<dyn NotificationsApi>) -> Self {
        Self {
            repo,
            notifications,
        }
    }

    // ---- staff ----

    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_staff(&self, new: NewStaffMember) -> Result<StaffMember, DomainError> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if new.salary < 0 {
            return Err(DomainError::validation("salary", "must not be negative"));
        }
        let created = self.repo.insert_staff(new).await?;
        info!(id = %created.id, "staff member created");
        Ok(created)
    }

    pub async fn update_staff(
        &self,
        id: Uuid,
        patch: StaffPatch,
    ) -> Result<StaffMember, DomainError> {
        if let Some(salary) = patch.salary {
            if salary < 0 {
                return Err(DomainError::validation("salary", "must not be negative"));
            }
        }
        self.repo.update_staff(id, patch).await
    }

    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, DomainError> {
        self.repo.list_staff().await
    }

    pub async fn get_staff(&self, id: Uuid) -> Result<StaffMember, DomainError> {
        self.repo
            .get_staff(id)
            .await?
            .ok_or(DomainError::StaffNotFound { id })
    }

    pub async fn delete_staff(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete_staff(id).await? {
            Ok(())
        } else {
            Err(DomainError::StaffNotFound { id })
        }
    }

    #[instrument(skip(self, new), fields(staff_id = %new.staff_id, amount = new.amount))]
    pub async fn record_staff_payment(
        &self,
        new: NewStaffPayment,
    ) -> Result<StaffPayment, DomainError> {
        if new.amount <= 0 {
            return Err(DomainError::validation("amount", "must be positive"));
        }
        self.get_staff(new.staff_id).await?;
        self.repo.insert_staff_payment(new, receipt_number()).await
    }

    pub async fn list_staff_payments(
        &self,
        staff_id: Uuid,
    ) -> Result<Vec<StaffPayment>, DomainError> {
        self.repo.list_staff_payments(staff_id).await
    }

    // ---- salaried players ----

    pub async fn create_salary_player(
        &self,
        new: NewSalaryPlayer,
    ) -> Result<SalaryPlayer, DomainError> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        self.repo.insert_salary_player(new).await
    }

    pub async fn list_salary_players(&self) -> Result<Vec<SalaryPlayer>, DomainError> {
        self.repo.list_salary_players().await
    }

    pub async fn get_salary_player(&self, id: Uuid) -> Result<SalaryPlayer, DomainError> {
        self.repo
            .get_salary_player(id)
            .await?
            .ok_or(DomainError::PlayerNotFound { id })
    }

    pub async fn delete_salary_player(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete_salary_player(id).await? {
            Ok(())
        } else {
            Err(DomainError::PlayerNotFound { id })
        }
    }

    /// Record a salary revision; becomes the current salary.
    pub async fn set_salary(
        &self,
        player_id: Uuid,
        salary: i64,
    ) -> Result<PlayerSalary, DomainError> {
        if salary < 0 {
            return Err(DomainError::validation("salary", "must not be negative"));
        }
        self.get_salary_player(player_id).await?;
        self.repo.insert_salary(player_id, salary).await
    }

    pub async fn current_salary(&self, player_id: Uuid) -> Result<PlayerSalary, DomainError> {
        self.repo
            .current_salary(player_id)
            .await?
            .ok_or(DomainError::NoSalary { id: player_id })
    }

    /// Record a salary payment; optionally raises a payment-received
    /// notification. A notification failure never undoes the payment.
    #[instrument(skip(self, new), fields(player_id = %new.player_id, amount = new.amount))]
    pub async fn record_salary_payment(
        &self,
        new: NewSalaryPayment,
    ) -> Result<SalaryPayment, DomainError> {
        if new.amount <= 0 {
            return Err(DomainError::validation("amount", "must be positive"));
        }
        let player = self.get_salary_player(new.player_id).await?;
        let notify_user_id = new.notify_user_id;

        let payment = self.repo.insert_salary_payment(new, receipt_number()).await?;

        if let Some(user_id) = notify_user_id {
            let note = messages::payment_received(user_id, &player.name, payment.amount);
            if let Err(e) = self.notifications.notify(note).await {
                warn!(error = %e, "payment recorded but notification failed");
            }
        }
        Ok(payment)
    }

    pub async fn list_salary_payments(
        &self,
        player_id: Uuid,
    ) -> Result<Vec<SalaryPayment>, DomainError> {
        self.repo.list_salary_payments(player_id).await
    }

    /// Payroll dashboard figures for the month containing `today`.
    ///
    /// A player without a salary revision counts as a member with a zero
    /// salary, so any (or no) payment marks them paid. The per-team slices
    /// only cover players assigned to a team.
    pub async fn salary_stats(&self, today: NaiveDate) -> Result<SalaryStats, DomainError> {
        let (month_start, month_end) = month_window(today);
        let (prev_start, prev_end) = month_window(month_start - Duration::days(1));

        let players = self.repo.list_salary_players().await?;
        let total_members = players.len() as u32;

        let mut total_amount = 0i64;
        let mut paid_amount = 0i64;
        let mut previous_month_paid = 0i64;
        let mut paid_members = 0u32;
        let mut teams: Vec<TeamSalaryStats> = Vec::new();

        for player in &players {
            let salary = self
                .repo
                .current_salary(player.id)
                .await?
                .map(|s| s.salary)
                .unwrap_or(0);
            total_amount += salary;

            let payments = self.repo.list_salary_payments(player.id).await?;
            let in_window = |p: &&SalaryPayment, start: NaiveDate, end: NaiveDate| {
                p.payment_date >= start && p.payment_date <= end
            };
            let month_paid: i64 = payments
                .iter()
                .filter(|p| in_window(p, month_start, month_end))
                .map(|p| p.amount)
                .sum();
            let prev_paid: i64 = payments
                .iter()
                .filter(|p| in_window(p, prev_start, prev_end))
                .map(|p| p.amount)
                .sum();

            paid_amount += month_paid;
            previous_month_paid += prev_paid;
            if month_paid >= salary {
                paid_members += 1;
            }

            if let Some(team_id) = player.team_id {
                let idx = match teams.iter().position(|t| t.team_id == team_id) {
                    Some(i) => i,
                    None => {
                        teams.push(TeamSalaryStats {
                            team_id,
                            total_members: 0,
                            paid_amount: 0,
                            pending_amount: 0,
                        });
                        teams.len() - 1
                    }
                };
                teams[idx].total_members += 1;
                teams[idx].paid_amount += month_paid;
                teams[idx].pending_amount += salary - month_paid;
            }
        }

        let percentage_change = if previous_month_paid != 0 {
            (paid_amount - previous_month_paid) as f64 / previous_month_paid as f64 * 100.0
        } else {
            0.0
        };

        Ok(SalaryStats {
            total_members,
            paid_members,
            pending_members: total_members - paid_members,
            total_amount,
            paid_amount,
            pending_amount: total_amount - paid_amount,
            average_salary: if total_members > 0 {
                total_amount / total_members as i64
            } else {
                0
            },
            monthly_comparison: MonthlyComparison {
                current_month: paid_amount,
                previous_month: previous_month_paid,
                percentage_change,
            },
            teams,
        })
    }

    /// The scanner's data set: every salaried player that has a current
    /// salary, with the full payment history. Players without a salary
    /// revision yet owe nothing and are skipped.
    pub async fn monthly_obligations(&self) -> Result<Vec<SalaryObligation>, DomainError> {
        let players = self.repo.list_salary_players().await?;
        let mut out = Vec::with_capacity(players.len());

        for player in players {
            let Some(salary) = self.repo.current_salary(player.id).await? else {
                continue;
            };
            let payments = self
                .repo
                .list_salary_payments(player.id)
                .await?
                .into_iter()
                .map(|p| ObligationPayment {
                    amount: p.amount,
                    paid_on: p.payment_date,
                })
                .collect();
            out.push(SalaryObligation {
                player_id: player.id,
                player_name: player.name,
                salary: salary.salary,
                payments,
            });
        }
        Ok(out)
    }
}
