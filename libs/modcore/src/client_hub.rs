//! Type-safe hub for cross-module client APIs.
//!
//! Providers register an implementation once; consumers fetch by
//! *interface type* (trait object): `hub.get::<dyn NotificationsApi>()`.
//! Key = fully-qualified `type_name::<T>()`, which works for `T = dyn Trait`;
//! value = `Arc<T>` stored as `Box<dyn Any + Send + Sync>` and downcast on
//! read. Re-registering overwrites atomically; Arcs already held by
//! consumers remain valid. For tests, register a mock under the same trait
//! type.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, sync::Arc};

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client not found: {0}")]
    NotFound(&'static str),

    #[error("type mismatch in hub for {0}")]
    TypeMismatch(&'static str),
}

type Boxed = Box<dyn Any + Send + Sync>;

/// Registry of clients keyed by interface type.
#[derive(Default)]
pub struct ClientHub {
    map: RwLock<HashMap<&'static str, Boxed>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an implementation of interface `T`.
    pub fn register<T: ?Sized + 'static>(&self, client: Arc<T>)
    where
        Arc<T>: Send + Sync,
    {
        self.map
            .write()
            .insert(std::any::type_name::<T>(), Box::new(client));
    }

    /// Fetch the registered implementation of interface `T`.
    pub fn get<T: ?Sized + 'static>(&self) -> Result<Arc<T>, ClientHubError>
    where
        Arc<T>: Send + Sync + Clone,
    {
        let key = std::any::type_name::<T>();
        let map = self.map.read();
        let boxed = map.get(key).ok_or(ClientHubError::NotFound(key))?;
        boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ClientHubError::TypeMismatch(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn hello(&self) -> &'static str;
    }

    struct English;
    impl Greeter for English {
        fn hello(&self) -> &'static str {
            "hello"
        }
    }

    struct Spanish;
    impl Greeter for Spanish {
        fn hello(&self) -> &'static str {
            "hola"
        }
    }

    #[test]
    fn register_and_get_trait_object() {
        let hub = ClientHub::new();
        hub.register::<dyn Greeter>(Arc::new(English));
        let g = hub.get::<dyn Greeter>().unwrap();
        assert_eq!(g.hello(), "hello");
    }

    #[test]
    fn re_register_overwrites() {
        let hub = ClientHub::new();
        hub.register::<dyn Greeter>(Arc::new(English));
        hub.register::<dyn Greeter>(Arc::new(Spanish));
        assert_eq!(hub.get::<dyn Greeter>().unwrap().hello(), "hola");
    }

    #[test]
    fn missing_client_is_an_error() {
        let hub = ClientHub::new();
        assert!(hub.get::<dyn Greeter>().is_err());
    }
}
