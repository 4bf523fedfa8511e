use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use modcore::client_hub::ClientHub;
use modcore::context::ModuleCtx;
use modcore::contracts::{DbModule, Module, RestfulModule, StatefulModule};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::config::NotificationsConfig;
use crate::contract::client::NotificationsApi;
use crate::domain::calendar::SystemClock;
use crate::domain::ports::ObligationsSource;
use crate::domain::scanner::ObligationScanner;
use crate::domain::service::NotificationsService;
use crate::gateways::local::NotificationsLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::repo::SeaOrmNotificationsRepository;

/// Wires the notification log and the monthly obligation scanner.
#[derive(Default)]
pub struct NotificationsModule {
    service: ArcSwapOption<NotificationsService>,
    config: ArcSwapOption<NotificationsConfig>,
    hub: ArcSwapOption<ClientHub>,
    scanner_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

#[async_trait]
impl Module for NotificationsModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("notifications module requires a database"))?;

        let config: NotificationsConfig = ctx.module_config();
        let repo = Arc::new(SeaOrmNotificationsRepository::new(Arc::new(db.sea())));
        let service = Arc::new(NotificationsService::new(repo));

        let client = Arc::new(NotificationsLocalClient::new(service.clone()));
        ctx.client_hub()
            .register::<dyn NotificationsApi>(client);

        self.service.store(Some(service));
        self.config.store(Some(Arc::new(config)));
        // Kept so the scanner can resolve its obligations source after all
        // modules have initialized.
        self.hub.store(Some(ctx.client_hub_arc()));

        info!("notifications module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for NotificationsModule {
    async fn migrate(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for NotificationsModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("notifications module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}

#[async_trait]
impl StatefulModule for NotificationsModule {
    async fn start(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        let Some(config) = self.config.load_full() else {
            anyhow::bail!("notifications module not initialized");
        };
        let Some(service) = self.service.load_full() else {
            anyhow::bail!("notifications module not initialized");
        };

        let Some(recipient) = config.admin_user_id else {
            warn!("no admin_user_id configured, obligation scanner disabled");
            return Ok(());
        };

        let Some(hub) = self.hub.load_full() else {
            anyhow::bail!("notifications module not initialized");
        };
        let source = hub.get::<dyn ObligationsSource>()?;

        let scanner = ObligationScanner::new(
            source,
            service,
            Arc::new(SystemClock),
            recipient,
            Duration::from_secs(config.scan_interval_hours * 3600),
        );

        let handle = tokio::spawn(async move { scanner.run(cancel).await });
        *self.scanner_task.lock() = Some(handle);
        Ok(())
    }

    async fn stop(&self, _cancel: CancellationToken) -> anyhow::Result<()> {
        let handle = self.scanner_task.lock().take();
        if let Some(handle) = handle {
            handle.await?;
        }
        Ok(())
    }
}
