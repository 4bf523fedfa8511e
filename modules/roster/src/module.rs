use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use tracing::info;

use mailer::EmailClient;
use modcore::context::ModuleCtx;
use modcore::contracts::{DbModule, Module, RestfulModule};
use notifications::NotificationsApi;
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::config::RosterConfig;
use crate::domain::service::RosterService;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::repo::SeaOrmRosterRepository;

/// Wires roster storage and the optional receipt mailer. Requires the
/// notifications module to be registered first.
#[derive(Default)]
pub struct RosterModule {
    service: ArcSwapOption<RosterService>,
}

#[async_trait]
impl Module for RosterModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("roster module requires a database"))?;
        let config: RosterConfig = ctx.module_config();

        let mailer = match &config.mailer {
            Some(cfg) => Some(Arc::new(EmailClient::new(cfg)?)),
            None => None,
        };

        let notifications = ctx.client_hub().get::<dyn NotificationsApi>()?;
        let repo = Arc::new(SeaOrmRosterRepository::new(Arc::new(db.sea())));
        let service = Arc::new(RosterService::new(repo, notifications, mailer));

        self.service.store(Some(service));
        info!("roster module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for RosterModule {
    async fn migrate(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for RosterModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("roster module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}
