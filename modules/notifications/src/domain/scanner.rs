//! Monthly sweep over salary obligations.
//!
//! On the first day of each month the scanner compares every salaried
//! player's salary against what was paid within that month and raises one
//! payment-due notification per player still short. Sweeps are stateless:
//! there is no dedup key, so a second sweep on the same day raises the
//! same notifications again (see DESIGN.md).

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::calendar::{is_first_of_month, month_window, Clock};
use crate::domain::messages;
use crate::domain::ports::{ObligationsSource, SalaryObligation};
use crate::domain::service::NotificationsService;

pub struct ObligationScanner {
    source: Arc<dyn ObligationsSource>,
    notifications: Arc<NotificationsService>,
    clock: Arc<dyn Clock>,
    recipient: Uuid,
    interval: Duration,
}

impl ObligationScanner {
    pub fn new(
        source: Arc<dyn ObligationsSource>,
        notifications: Arc<NotificationsService>,
        clock: Arc<dyn Clock>,
        recipient: Uuid,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            notifications,
            clock,
            recipient,
            interval,
        }
    }

    /// Shortfall of one obligation for the month containing `today`.
    fn shortfall(obligation: &SalaryObligation, today: chrono::NaiveDate) -> i64 {
        let (first, last) = month_window(today);
        let paid: i64 = obligation
            .payments
            .iter()
            .filter(|p| p.paid_on >= first && p.paid_on <= last)
            .map(|p| p.amount)
            .sum();
        obligation.salary - paid
    }

    /// One full sweep; returns how many notifications were raised.
    ///
    /// A failure fetching obligations aborts this sweep only; the next
    /// tick starts fresh.
    pub async fn sweep(&self) -> usize {
        let obligations = match self.source.monthly_obligations().await {
            Ok(o) => o,
            Err(e) => {
                warn!(error = %e, "obligation sweep aborted: fetch failed");
                return 0;
            }
        };

        let today = self.clock.now().date_naive();
        let (_, last_day) = month_window(today);
        let mut raised = 0usize;

        for obligation in &obligations {
            let due = Self::shortfall(obligation, today);
            if due <= 0 {
                continue;
            }
            let new = messages::payment_due(self.recipient, &obligation.player_name, due, last_day);
            match self.notifications.create(new).await {
                Ok(_) => raised += 1,
                Err(e) => {
                    warn!(player = %obligation.player_name, error = %e, "failed to raise payment-due notification")
                }
            }
        }

        info!(
            players = obligations.len(),
            raised, "obligation sweep finished"
        );
        raised
    }

    /// Background loop: sweep at startup when today is the 1st, then wake
    /// every interval and sweep again whenever the wake-up lands on a 1st.
    pub async fn run(&self, cancel: CancellationToken) {
        let now = self.clock.now();
        if is_first_of_month(now) {
            info!(day = now.day(), "startup falls on the 1st, sweeping");
            self.sweep().await;
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("obligation scanner stopping");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {
                    if is_first_of_month(self.clock.now()) {
                        self.sweep().await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::Mutex;

    use crate::contract::model::{NewNotification, Notification};
    use crate::domain::error::DomainError;
    use crate::domain::ports::ObligationPayment;
    use crate::domain::repo::NotificationsRepository;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationsRepository for MemoryRepo {
        async fn insert(&self, new: NewNotification) -> Result<Notification, DomainError> {
            let n = Notification {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                kind: new.kind,
                title: new.title,
                message: new.message,
                read: false,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(n.clone());
            Ok(n)
        }

        async fn list_recent(
            &self,
            user_id: Uuid,
            limit: u64,
        ) -> Result<Vec<Notification>, DomainError> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect();
            rows.reverse();
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn unread_count(&self, user_id: Uuid) -> Result<u64, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id && !n.read)
                .count() as u64)
        }

        async fn mark_read(&self, id: Uuid) -> Result<(), DomainError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|n| n.id == id) {
                Some(n) => {
                    n.read = true;
                    Ok(())
                }
                None => Err(DomainError::not_found(id)),
            }
        }
    }

    struct FixedSource(Vec<SalaryObligation>);

    #[async_trait]
    impl ObligationsSource for FixedSource {
        async fn monthly_obligations(&self) -> anyhow::Result<Vec<SalaryObligation>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl ObligationsSource for BrokenSource {
        async fn monthly_obligations(&self) -> anyhow::Result<Vec<SalaryObligation>> {
            anyhow::bail!("payroll unavailable")
        }
    }

    fn obligation(name: &str, salary: i64, payments: Vec<(i64, NaiveDate)>) -> SalaryObligation {
        SalaryObligation {
            player_id: Uuid::new_v4(),
            player_name: name.to_string(),
            salary,
            payments: payments
                .into_iter()
                .map(|(amount, paid_on)| ObligationPayment { amount, paid_on })
                .collect(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scanner_at(
        source: Arc<dyn ObligationsSource>,
        repo: Arc<MemoryRepo>,
        now: DateTime<Utc>,
        recipient: Uuid,
    ) -> ObligationScanner {
        ObligationScanner::new(
            source,
            Arc::new(NotificationsService::new(repo)),
            Arc::new(FixedClock(now)),
            recipient,
            Duration::from_secs(24 * 3600),
        )
    }

    #[tokio::test]
    async fn unpaid_salary_raises_one_notification_for_the_full_amount() {
        let repo = Arc::new(MemoryRepo::default());
        let admin = Uuid::new_v4();
        let source = Arc::new(FixedSource(vec![obligation("Juan", 10000, vec![])]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        let raised = scanner_at(source, repo.clone(), now, admin).sweep().await;

        assert_eq!(raised, 1);
        let rows = repo.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, admin);
        assert_eq!(rows[0].title, "Pago Pendiente");
        assert_eq!(
            rows[0].message,
            "El pago de 100.00€ para Juan vence el 31/03/2025"
        );
    }

    #[tokio::test]
    async fn fully_paid_salary_raises_nothing() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation(
            "Juan",
            10000,
            vec![(10000, d(2025, 3, 1))],
        )]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        let raised = scanner_at(source, repo.clone(), now, Uuid::new_v4())
            .sweep()
            .await;

        assert_eq!(raised, 0);
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn last_months_payment_does_not_count() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation(
            "Juan",
            10000,
            vec![(5000, d(2025, 2, 28))],
        )]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        let raised = scanner_at(source, repo.clone(), now, Uuid::new_v4())
            .sweep()
            .await;

        assert_eq!(raised, 1);
        let rows = repo.rows.lock().unwrap();
        assert!(rows[0].message.starts_with("El pago de 100.00€"));
    }

    #[tokio::test]
    async fn partial_payment_this_month_raises_the_shortfall() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation(
            "Juan",
            10000,
            vec![(4000, d(2025, 3, 1)), (1000, d(2025, 3, 1))],
        )]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        scanner_at(source, repo.clone(), now, Uuid::new_v4())
            .sweep()
            .await;

        let rows = repo.rows.lock().unwrap();
        assert!(rows[0].message.starts_with("El pago de 50.00€"));
    }

    #[tokio::test]
    async fn overpaid_salary_raises_nothing() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation(
            "Juan",
            10000,
            vec![(15000, d(2025, 3, 1))],
        )]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        let raised = scanner_at(source, repo.clone(), now, Uuid::new_v4())
            .sweep()
            .await;

        assert_eq!(raised, 0);
    }

    #[tokio::test]
    async fn repeated_sweeps_create_duplicates() {
        // Stateless by design: no dedup key exists, so sweeping twice on
        // the same day doubles the notifications.
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation("Juan", 10000, vec![])]));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let scanner = scanner_at(source, repo.clone(), now, Uuid::new_v4());

        scanner.sweep().await;
        scanner.sweep().await;

        assert_eq!(repo.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_aborts_the_sweep_quietly() {
        let repo = Arc::new(MemoryRepo::default());
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        let raised = scanner_at(Arc::new(BrokenSource), repo.clone(), now, Uuid::new_v4())
            .sweep()
            .await;

        assert_eq!(raised, 0);
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_sweeps_at_startup_only_on_the_first() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![obligation("Juan", 10000, vec![])]));
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 0, 0).unwrap();
        let scanner = scanner_at(source, repo.clone(), now, Uuid::new_v4());

        let cancel = CancellationToken::new();
        cancel.cancel();
        scanner.run(cancel).await;

        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_stops_on_cancellation() {
        let repo = Arc::new(MemoryRepo::default());
        let source = Arc::new(FixedSource(vec![]));
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 0, 0).unwrap();
        let scanner = Arc::new(scanner_at(source, repo, now, Uuid::new_v4()));

        let cancel = CancellationToken::new();
        let handle = {
            let scanner = scanner.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { scanner.run(cancel).await })
        };
        cancel.cancel();
        handle.await.unwrap();
    }
}
