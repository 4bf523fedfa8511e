use std::sync::Arc;

use chrono::Utc;
use tracing::{instrument, warn};
use uuid::Uuid;

use resilient::{QueryExecutor, QueryOptions};

use crate::contract::error::SettingsError;
use crate::contract::model::UserSettings;
use crate::domain::error::RepoError;
use crate::domain::repo::{SettingsRepository, UpdateOutcome};

const LOAD_MESSAGE: &str = "failed to load settings";
const SAVE_MESSAGE: &str = "failed to save settings";

/// Load/save orchestration over the settings repository.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    executor: QueryExecutor,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self {
            repo,
            executor: QueryExecutor::new(),
        }
    }

    /// Swap in a custom executor (tests inject a zero-delay sleeper).
    pub fn with_executor(repo: Arc<dyn SettingsRepository>, executor: QueryExecutor) -> Self {
        Self { repo, executor }
    }

    /// Load the user's settings, falling open to defaults.
    ///
    /// A missing row is a normal outcome (new user) and yields defaults
    /// without retrying. A terminal storage failure is logged and also
    /// yields defaults so the rest of the application keeps working.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: Uuid) -> UserSettings {
        let opts = QueryOptions::with_message(LOAD_MESSAGE).allow_empty();
        let outcome = self
            .executor
            .run(&opts, || self.repo.fetch(user_id))
            .await;

        match outcome {
            Ok(Some(settings)) => settings,
            Ok(None) => UserSettings::default(),
            Err(e) => {
                warn!(%user_id, error = %e, attempts = e.attempts, "settings load failed, using defaults");
                UserSettings::default()
            }
        }
    }

    /// Persist the full settings blob for the user, failing closed.
    ///
    /// Tries UPDATE first; when the row does not exist yet the repository
    /// reports that as a tagged outcome and the service falls back to
    /// INSERT. The whole upsert is retried as one operation.
    #[instrument(skip(self, settings))]
    pub async fn save(&self, user_id: Uuid, settings: &UserSettings) -> Result<(), SettingsError> {
        let opts = QueryOptions::with_message(SAVE_MESSAGE);
        let result = self
            .executor
            .run(&opts, || async {
                let now = Utc::now();
                match self.repo.update(user_id, settings, now).await? {
                    UpdateOutcome::Updated => {}
                    UpdateOutcome::NoRow => self.repo.insert(user_id, settings, now).await?,
                }
                Ok::<_, RepoError>(Some(()))
            })
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(%user_id, error = %e, attempts = e.attempts, "settings save failed");
                Err(SettingsError::SaveFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use resilient::Sleeper;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::contract::model::Theme;
    use crate::domain::error::RepoError;

    struct NoopSleeper;

    #[async_trait]
    impl Sleeper for NoopSleeper {
        async fn sleep(&self, _d: Duration) {}
    }

    fn fast_service(repo: Arc<dyn SettingsRepository>) -> SettingsService {
        SettingsService::with_executor(repo, QueryExecutor::with_sleeper(Arc::new(NoopSleeper)))
    }

    #[derive(Default)]
    struct FakeRepo {
        stored: Mutex<Option<UserSettings>>,
        fetch_failures: AtomicU32,
        update_failures: AtomicU32,
        update_fails: bool,
        fetch_calls: AtomicU32,
        insert_calls: AtomicU32,
    }

    #[async_trait]
    impl SettingsRepository for FakeRepo {
        async fn fetch(&self, _user_id: Uuid) -> Result<Option<UserSettings>, RepoError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fetch_failures.load(Ordering::SeqCst) > 0 {
                self.fetch_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(RepoError::database("connection reset"));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn update(
            &self,
            _user_id: Uuid,
            settings: &UserSettings,
            _updated_at: DateTime<Utc>,
        ) -> Result<UpdateOutcome, RepoError> {
            if self.update_fails {
                return Err(RepoError::database("disk full"));
            }
            if self.update_failures.load(Ordering::SeqCst) > 0 {
                self.update_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(RepoError::database("connection reset"));
            }
            let mut stored = self.stored.lock().unwrap();
            match stored.as_mut() {
                Some(s) => {
                    *s = settings.clone();
                    Ok(UpdateOutcome::Updated)
                }
                None => Ok(UpdateOutcome::NoRow),
            }
        }

        async fn insert(
            &self,
            _user_id: Uuid,
            settings: &UserSettings,
            _updated_at: DateTime<Utc>,
        ) -> Result<(), RepoError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_returns_defaults_for_missing_row_without_retrying() {
        let repo = Arc::new(FakeRepo::default());
        let service = fast_service(repo.clone());

        let settings = service.load(Uuid::new_v4()).await;

        assert_eq!(settings, UserSettings::default());
        assert_eq!(repo.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn load_fails_open_to_defaults_after_exhausted_retries() {
        let repo = Arc::new(FakeRepo {
            fetch_failures: AtomicU32::new(10),
            ..Default::default()
        });
        let service = fast_service(repo.clone());

        let settings = service.load(Uuid::new_v4()).await;

        assert_eq!(settings, UserSettings::default());
        assert_eq!(repo.fetch_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn load_recovers_on_a_later_attempt() {
        let mut custom = UserSettings::default();
        custom.theme = Theme::Dark;
        let repo = Arc::new(FakeRepo {
            stored: Mutex::new(Some(custom.clone())),
            fetch_failures: AtomicU32::new(2),
            ..Default::default()
        });
        let service = fast_service(repo.clone());

        let settings = service.load(Uuid::new_v4()).await;

        assert_eq!(settings, custom);
        assert_eq!(repo.fetch_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn save_falls_back_to_insert_when_no_row_exists() {
        let repo = Arc::new(FakeRepo::default());
        let service = fast_service(repo.clone());

        let mut custom = UserSettings::default();
        custom.email.enabled = false;
        service.save(Uuid::new_v4(), &custom).await.unwrap();

        assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repo.stored.lock().unwrap().clone(), Some(custom));
    }

    #[tokio::test]
    async fn save_updates_in_place_when_row_exists() {
        let repo = Arc::new(FakeRepo {
            stored: Mutex::new(Some(UserSettings::default())),
            ..Default::default()
        });
        let service = fast_service(repo.clone());

        let mut custom = UserSettings::default();
        custom.theme = Theme::Light;
        service.save(Uuid::new_v4(), &custom).await.unwrap();

        assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 0);
        assert_eq!(repo.stored.lock().unwrap().clone(), Some(custom));
    }

    #[tokio::test]
    async fn save_retries_past_transient_storage_errors() {
        let repo = Arc::new(FakeRepo {
            stored: Mutex::new(Some(UserSettings::default())),
            update_failures: AtomicU32::new(2),
            ..Default::default()
        });
        let service = fast_service(repo.clone());

        let mut custom = UserSettings::default();
        custom.theme = Theme::Dark;
        service.save(Uuid::new_v4(), &custom).await.unwrap();

        assert_eq!(repo.stored.lock().unwrap().clone(), Some(custom));
    }

    #[tokio::test]
    async fn save_fails_closed_on_persistent_storage_error() {
        let repo = Arc::new(FakeRepo {
            update_fails: true,
            ..Default::default()
        });
        let service = fast_service(repo.clone());

        let err = service
            .save(Uuid::new_v4(), &UserSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SettingsError::SaveFailed));
        assert_eq!(err.to_string(), "failed to save settings");
    }
}
