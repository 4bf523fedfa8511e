use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use tracing::info;

use modcore::context::ModuleCtx;
use modcore::contracts::{DbModule, Module, RestfulModule};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::domain::service::InvoicesService;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::repo::SeaOrmInvoicesRepository;

#[derive(Default)]
pub struct InvoicesModule {
    service: ArcSwapOption<InvoicesService>,
}

#[async_trait]
impl Module for InvoicesModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("invoices module requires a database"))?;

        let repo = Arc::new(SeaOrmInvoicesRepository::new(Arc::new(db.sea())));
        self.service.store(Some(Arc::new(InvoicesService::new(repo))));
        info!("invoices module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for InvoicesModule {
    async fn migrate(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for InvoicesModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("invoices module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}
