use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use tracing::info;

use modcore::context::ModuleCtx;
use modcore::contracts::{DbModule, Module, RestfulModule};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::domain::service::SettingsService;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::repo::SeaOrmSettingsRepository;
use crate::provider::SettingsProvider;

/// Wires the settings storage, service and provider into the server.
#[derive(Default)]
pub struct SettingsModule {
    service: ArcSwapOption<SettingsService>,
}

#[async_trait]
impl Module for SettingsModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("settings module requires a database"))?;

        let repo = Arc::new(SeaOrmSettingsRepository::new(Arc::new(db.sea())));
        let service = Arc::new(SettingsService::new(repo));
        let provider = Arc::new(SettingsProvider::new(service.clone()));

        ctx.client_hub().register::<SettingsProvider>(provider);
        self.service.store(Some(service));

        info!("settings module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for SettingsModule {
    async fn migrate(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for SettingsModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("settings module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}
