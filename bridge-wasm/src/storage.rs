//! `localStorage`-backed implementation of the `KeyValueStore` bridge.
//!
//! Keys are prefixed with a namespace so several host shells sharing an
//! origin do not clobber each other's data.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    storage::KeyValueStore,
};

use crate::error::js_error;

const KV_PREFIX: &str = "kv";

fn local_storage() -> BridgeResult<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".into()))?;
    window
        .local_storage()
        .map_err(|err| js_error("localStorage", err))?
        .ok_or_else(|| BridgeError::NotAvailable("localStorage".into()))
}

fn scoped_key(namespace: &str, kind: &str, key: &str) -> String {
    format!("{namespace}::{kind}::{key}")
}

/// Plain string store layered on `localStorage`.
#[derive(Clone)]
pub struct LocalStorageKeyValueStore {
    storage: web_sys::Storage,
    namespace: String,
}

impl LocalStorageKeyValueStore {
    /// Construct a store scoped to the provided namespace.
    pub fn new(namespace: impl Into<String>) -> BridgeResult<Self> {
        Ok(Self {
            storage: local_storage()?,
            namespace: namespace.into(),
        })
    }

    fn key_for(&self, key: &str) -> String {
        scoped_key(&self.namespace, KV_PREFIX, key)
    }
}

#[async_trait(?Send)]
impl KeyValueStore for LocalStorageKeyValueStore {
    async fn get(&self, key: &str) -> BridgeResult<Option<String>> {
        self.storage
            .get_item(&self.key_for(key))
            .map_err(|err| js_error("get_item", err))
    }

    async fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.storage
            .set_item(&self.key_for(key), value)
            .map_err(|err| js_error("set_item", err))
    }

    async fn remove(&self, key: &str) -> BridgeResult<()> {
        self.storage
            .remove_item(&self.key_for(key))
            .map_err(|err| js_error("remove_item", err))
    }
}
