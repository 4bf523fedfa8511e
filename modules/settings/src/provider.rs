use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::contract::error::SettingsError;
use crate::contract::model::UserSettings;
use crate::domain::service::SettingsService;

/// Snapshot published to provider subscribers.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub settings: Arc<UserSettings>,
    /// True between an identity change and the completion of its load.
    pub loading: bool,
}

impl SettingsState {
    fn loading_defaults() -> Self {
        Self {
            settings: Arc::new(UserSettings::default()),
            loading: true,
        }
    }
}

/// In-process holder of the active user's settings.
///
/// State changes only through explicit calls: `set_identity` reloads for the
/// new user (or resets to defaults for none), `update` persists and
/// publishes. There is no background refresh and no cross-process sync; a
/// single cache serves the whole process.
pub struct SettingsProvider {
    service: Arc<SettingsService>,
    tx: watch::Sender<SettingsState>,
    identity: parking_lot::Mutex<Option<Uuid>>,
}

impl SettingsProvider {
    pub fn new(service: Arc<SettingsService>) -> Self {
        // Publishing goes through `send_replace`, which stores the new state
        // even while nobody is subscribed.
        let (tx, _rx) = watch::channel(SettingsState::loading_defaults());
        Self {
            service,
            tx,
            identity: parking_lot::Mutex::new(None),
        }
    }

    /// Current settings snapshot.
    pub fn current(&self) -> Arc<UserSettings> {
        self.tx.borrow().settings.clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.tx.subscribe()
    }

    /// Switch the active identity and reload its settings.
    ///
    /// `None` clears the identity and resets to defaults without touching
    /// storage. Load failures inside the service already fail open, so this
    /// always completes.
    pub async fn set_identity(&self, user_id: Option<Uuid>) {
        *self.identity.lock() = user_id;

        match user_id {
            None => {
                self.tx.send_replace(SettingsState {
                    settings: Arc::new(UserSettings::default()),
                    loading: false,
                });
            }
            Some(id) => {
                self.tx.send_replace(SettingsState {
                    settings: self.current(),
                    loading: true,
                });
                let settings = self.service.load(id).await;
                info!(user_id = %id, "settings loaded for identity");
                self.tx.send_replace(SettingsState {
                    settings: Arc::new(settings),
                    loading: false,
                });
            }
        }
    }

    /// Persist new settings for the active identity and publish them.
    ///
    /// Without an identity the new settings only live in memory.
    pub async fn update(&self, settings: UserSettings) -> Result<(), SettingsError> {
        let identity = *self.identity.lock();
        if let Some(id) = identity {
            self.service.save(id, &settings).await?;
        }
        self.tx.send_replace(SettingsState {
            settings: Arc::new(settings),
            loading: false,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use resilient::{QueryExecutor, Sleeper};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::contract::model::Theme;
    use crate::domain::error::RepoError;
    use crate::domain::repo::{SettingsRepository, UpdateOutcome};

    struct NoopSleeper;

    #[async_trait]
    impl Sleeper for NoopSleeper {
        async fn sleep(&self, _d: Duration) {}
    }

    #[derive(Default)]
    struct FakeRepo {
        stored: Mutex<Option<UserSettings>>,
        broken: bool,
    }

    #[async_trait]
    impl SettingsRepository for FakeRepo {
        async fn fetch(&self, _user_id: Uuid) -> Result<Option<UserSettings>, RepoError> {
            if self.broken {
                return Err(RepoError::database("down"));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn update(
            &self,
            _user_id: Uuid,
            settings: &UserSettings,
            _updated_at: DateTime<Utc>,
        ) -> Result<UpdateOutcome, RepoError> {
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
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    fn provider_with(repo: FakeRepo) -> SettingsProvider {
        let service = Arc::new(crate::domain::service::SettingsService::with_executor(
            Arc::new(repo),
            QueryExecutor::with_sleeper(Arc::new(NoopSleeper)),
        ));
        SettingsProvider::new(service)
    }

    #[tokio::test]
    async fn starts_as_loading_defaults() {
        let provider = provider_with(FakeRepo::default());
        let rx = provider.subscribe();
        assert!(rx.borrow().loading);
        assert_eq!(*provider.current(), UserSettings::default());
    }

    #[tokio::test]
    async fn identity_switch_loads_persisted_settings() {
        let mut custom = UserSettings::default();
        custom.theme = Theme::Dark;
        let provider = provider_with(FakeRepo {
            stored: Mutex::new(Some(custom.clone())),
            broken: false,
        });

        provider.set_identity(Some(Uuid::new_v4())).await;

        assert_eq!(*provider.current(), custom);
        assert!(!provider.subscribe().borrow().loading);
    }

    #[tokio::test]
    async fn clearing_identity_resets_to_defaults() {
        let mut custom = UserSettings::default();
        custom.language = crate::contract::model::Language::En;
        let provider = provider_with(FakeRepo {
            stored: Mutex::new(Some(custom)),
            broken: false,
        });

        provider.set_identity(Some(Uuid::new_v4())).await;
        provider.set_identity(None).await;

        assert_eq!(*provider.current(), UserSettings::default());
    }

    #[tokio::test]
    async fn broken_storage_still_yields_defaults() {
        let provider = provider_with(FakeRepo {
            stored: Mutex::new(None),
            broken: true,
        });

        provider.set_identity(Some(Uuid::new_v4())).await;

        assert_eq!(*provider.current(), UserSettings::default());
        assert!(!provider.subscribe().borrow().loading);
    }

    #[tokio::test]
    async fn state_changes_land_without_any_subscriber() {
        let mut custom = UserSettings::default();
        custom.theme = Theme::Dark;
        let provider = provider_with(FakeRepo {
            stored: Mutex::new(Some(custom.clone())),
            broken: false,
        });

        // No receiver is held across the switch; `current()` must still
        // observe the loaded settings.
        provider.set_identity(Some(Uuid::new_v4())).await;

        assert_eq!(*provider.current(), custom);
        assert!(!provider.subscribe().borrow().loading);
    }

    #[tokio::test]
    async fn update_publishes_and_persists() {
        let provider = provider_with(FakeRepo::default());
        provider.set_identity(Some(Uuid::new_v4())).await;

        let mut custom = UserSettings::default();
        custom.email.notifications.reminders = false;
        provider.update(custom.clone()).await.unwrap();

        assert_eq!(*provider.current(), custom);
    }
}
