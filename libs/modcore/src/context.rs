use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::client_hub::ClientHub;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Context handed to every module during wiring.
#[derive(Clone)]
pub struct ModuleCtx {
    db: Option<Arc<db::DbHandle>>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    client_hub: Arc<ClientHub>,
    cancellation_token: CancellationToken,
    module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            inner: ModuleCtx {
                db: None,
                config_provider: None,
                client_hub: Arc::new(ClientHub::default()),
                cancellation_token: token,
                module_name: None,
            },
        }
    }

    pub fn with_db(mut self, db: Arc<db::DbHandle>) -> Self {
        self.inner.db = Some(db);
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name (used by the registry).
    pub(crate) fn for_module(&self, name: &str) -> Self {
        let mut scoped = self.clone();
        scoped.module_name = Some(Arc::from(name));
        scoped
    }

    pub fn db(&self) -> Option<Arc<db::DbHandle>> {
        self.db.clone()
    }

    pub fn client_hub(&self) -> &ClientHub {
        &self.client_hub
    }

    /// Owning handle to the hub, for modules that resolve clients after
    /// the wiring phase (e.g. in their `start`).
    pub fn client_hub_arc(&self) -> Arc<ClientHub> {
        self.client_hub.clone()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Deserialize this module's config section, falling back to `T::default()`
    /// when the section is absent or malformed (the malformed case is logged).
    pub fn module_config<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(name) = self.module_name.as_deref() else {
            return T::default();
        };
        let Some(raw) = self
            .config_provider
            .as_ref()
            .and_then(|p| p.get_module_config(name))
        else {
            return T::default();
        };
        match serde_json::from_value(raw.clone()) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(module = name, error = %e, "invalid module config, using defaults");
                T::default()
            }
        }
    }
}
