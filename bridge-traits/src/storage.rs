//! Key-Value Persistence Abstraction
//!
//! The auth layer persists its bearer token through this trait rather than
//! touching platform storage directly, so tests can substitute the in-memory
//! store below.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{BridgeError, Result};
use crate::platform::PlatformSendSync;

/// Key-value persistence trait
///
/// Abstracts platform-specific string storage:
/// - Browser: `localStorage`
/// - Desktop: OS keychain or a JSON file in the config directory
/// - Tests: [`InMemoryKeyValueStore`]
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// async fn remember(store: &dyn KeyValueStore) -> Result<()> {
///     store.set("token", "abc").await?;
///     assert_eq!(store.get("token").await?, Some("abc".to_string()));
///     Ok(())
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait KeyValueStore: PlatformSendSync {
    /// Retrieve a value; `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous value for the key.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> BridgeError {
        BridgeError::OperationFailed("in-memory store lock poisoned".to_string())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
