use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::context::ModuleCtx;
use crate::contracts::{DbModule, Module, RestfulModule, StatefulModule};

/// One registered module plus its optional capability facets.
struct ModuleEntry {
    name: &'static str,
    module: Arc<dyn Module>,
    db: Option<Arc<dyn DbModule>>,
    rest: Option<Arc<dyn RestfulModule>>,
    stateful: Option<Arc<dyn StatefulModule>>,
}

/// Ordered module registry driving the phased startup sequence.
///
/// Phases run strictly in registration order:
/// 1. `init` — wiring, client publication;
/// 2. `migrate` — DB schema, for modules with the db facet;
/// 3. `register_rest` — router composition;
/// 4. `start` — background tasks (all clients already published).
#[derive(Default)]
pub struct ModuleRegistry {
    entries: Vec<ModuleEntry>,
}

/// Builder-style facet attachment for the most recently registered module.
pub struct ModuleSlot<'a> {
    entry: &'a mut ModuleEntry,
}

impl<'a> ModuleSlot<'a> {
    pub fn with_db(self, db: Arc<dyn DbModule>) -> Self {
        self.entry.db = Some(db);
        self
    }

    pub fn with_rest(self, rest: Arc<dyn RestfulModule>) -> Self {
        self.entry.rest = Some(rest);
        self
    }

    pub fn with_stateful(self, stateful: Arc<dyn StatefulModule>) -> Self {
        self.entry.stateful = Some(stateful);
        self
    }
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, module: Arc<dyn Module>) -> ModuleSlot<'_> {
        self.entries.push(ModuleEntry {
            name,
            module,
            db: None,
            rest: None,
            stateful: None,
        });
        ModuleSlot {
            entry: self
                .entries
                .last_mut()
                .unwrap_or_else(|| unreachable!("just pushed")),
        }
    }

    pub async fn run_init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        for entry in &self.entries {
            info!(module = entry.name, "initializing module");
            entry
                .module
                .init(&ctx.for_module(entry.name))
                .await
                .map_err(|e| anyhow::anyhow!("module '{}' init failed: {e}", entry.name))?;
        }
        Ok(())
    }

    pub async fn run_migrations(&self, db: &db::DbHandle) -> anyhow::Result<()> {
        for entry in &self.entries {
            if let Some(m) = &entry.db {
                info!(module = entry.name, "running module migrations");
                m.migrate(db)
                    .await
                    .map_err(|e| anyhow::anyhow!("module '{}' migrate failed: {e}", entry.name))?;
            }
        }
        Ok(())
    }

    pub fn build_router(&self, ctx: &ModuleCtx, mut router: Router) -> anyhow::Result<Router> {
        for entry in &self.entries {
            if let Some(r) = &entry.rest {
                info!(module = entry.name, "registering module REST routes");
                router = r.register_rest(&ctx.for_module(entry.name), router)?;
            }
        }
        Ok(router)
    }

    pub async fn start_all(&self, cancel: &CancellationToken) -> anyhow::Result<()> {
        for entry in &self.entries {
            if let Some(s) = &entry.stateful {
                info!(module = entry.name, "starting module background task");
                s.start(cancel.clone()).await.map_err(|e| {
                    anyhow::anyhow!("module '{}' start failed: {e}", entry.name)
                })?;
            }
        }
        Ok(())
    }

    /// Stop in reverse registration order.
    pub async fn stop_all(&self, cancel: &CancellationToken) {
        for entry in self.entries.iter().rev() {
            if let Some(s) = &entry.stateful {
                info!(module = entry.name, "stopping module background task");
                if let Err(e) = s.stop(cancel.clone()).await {
                    tracing::warn!(module = entry.name, error = %e, "module stop failed");
                }
            }
        }
    }
}
