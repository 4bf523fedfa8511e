use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use tracing::info;

use modcore::context::ModuleCtx;
use modcore::contracts::{DbModule, Module, RestfulModule};
use notifications::{NotificationsApi, ObligationsSource};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::domain::service::PayrollService;
use crate::gateways::local::PayrollObligationsGateway;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::repo::SeaOrmPayrollRepository;

/// Wires payroll storage and publishes the obligations source for the
/// scanner. Requires the notifications module to be registered first.
#[derive(Default)]
pub struct PayrollModule {
    service: ArcSwapOption<PayrollService>,
}

#[async_trait]
impl Module for PayrollModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let db = ctx
            .db()
            .ok_or_else(|| anyhow::anyhow!("payroll module requires a database"))?;

        let notifications = ctx.client_hub().get::<dyn NotificationsApi>()?;
        let repo = Arc::new(SeaOrmPayrollRepository::new(Arc::new(db.sea())));
        let service = Arc::new(PayrollService::new(repo, notifications));

        let gateway = Arc::new(PayrollObligationsGateway::new(service.clone()));
        ctx.client_hub()
            .register::<dyn ObligationsSource>(gateway);

        self.service.store(Some(service));
        info!("payroll module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for PayrollModule {
    async fn migrate(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for PayrollModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("payroll module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}
