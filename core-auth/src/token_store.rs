//! Bearer Token Storage
//!
//! Persists the single session token through an injected
//! [`KeyValueStore`], keyed by [`AUTH_TOKEN_KEY`] unless configured otherwise.
//!
//! ## Security
//!
//! - Token values are never logged
//! - Storage failures are reported without echoing the token
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::TokenStore;
//! use bridge_traits::InMemoryKeyValueStore;
//! use std::sync::Arc;
//! # async fn example() -> core_auth::Result<()> {
//! let token_store = TokenStore::new(Arc::new(InMemoryKeyValueStore::new()));
//!
//! token_store.save("eyJhbGciOi...").await?;
//! assert!(token_store.get().await?.is_some());
//!
//! token_store.clear().await?;
//! assert!(!token_store.is_authenticated().await?);
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use bridge_traits::storage::KeyValueStore;
use core_runtime::config::DEFAULT_AUTH_KEY;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = DEFAULT_AUTH_KEY;

/// Read/write access to the persisted bearer token.
///
/// At most one token is active: [`save`](TokenStore::save) replaces any
/// previous value and [`clear`](TokenStore::clear) returns the session to the
/// unauthenticated state. Cloning is cheap and clones share the same backing
/// store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("store", &"KeyValueStore { ... }")
            .field("key", &self.key)
            .finish()
    }
}

impl TokenStore {
    /// Create a token store using [`AUTH_TOKEN_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, AUTH_TOKEN_KEY)
    }

    /// Create a token store persisting under a custom key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        debug!(key = %key, "Initializing TokenStore");
        Self { store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted token, or `None` when unauthenticated.
    ///
    /// An empty stored value is treated as absent.
    pub async fn get(&self) -> Result<Option<String>> {
        let token = self.store.get(&self.key).await.map_err(|e| {
            warn!(key = %self.key, error = %e, "Failed to read token from storage");
            AuthError::StorageUnavailable(e.to_string())
        })?;

        Ok(token.filter(|token| !token.is_empty()))
    }

    /// Like [`get`](TokenStore::get) but fails with `NotAuthenticated`.
    pub async fn require(&self) -> Result<String> {
        self.get().await?.ok_or(AuthError::NotAuthenticated)
    }

    /// Persists a token, overwriting any previous value.
    pub async fn save(&self, token: &str) -> Result<()> {
        self.store.set(&self.key, token).await.map_err(|e| {
            warn!(key = %self.key, error = %e, "Failed to persist token");
            AuthError::StorageUnavailable(e.to_string())
        })?;

        info!(key = %self.key, "Token saved");
        Ok(())
    }

    /// Removes the token. Succeeds when no token is stored.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await.map_err(|e| {
            warn!(key = %self.key, error = %e, "Failed to remove token");
            AuthError::StorageUnavailable(e.to_string())
        })?;

        info!(key = %self.key, "Token cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::InMemoryKeyValueStore;
    use mockall::mock;

    mock! {
        Store {}

        #[async_trait]
        impl KeyValueStore for Store {
            async fn get(&self, key: &str) -> BridgeResult<Option<String>>;
            async fn set(&self, key: &str, value: &str) -> BridgeResult<()>;
            async fn remove(&self, key: &str) -> BridgeResult<()>;
        }
    }

    fn store() -> TokenStore {
        TokenStore::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_save_then_get_returns_token() {
        let tokens = store();
        tokens.save("first").await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), Some("first".to_string()));
    }

    #[tokio::test]
    async fn test_second_save_overwrites() {
        let tokens = store();
        tokens.save("first").await.unwrap();
        tokens.save("second").await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_clear_logs_out() {
        let tokens = store();
        tokens.save("first").await.unwrap();
        tokens.clear().await.unwrap();

        assert_eq!(tokens.get().await.unwrap(), None);
        assert!(!tokens.is_authenticated().await.unwrap());
        assert!(matches!(
            tokens.require().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_empty_value_is_unauthenticated() {
        let backing = Arc::new(InMemoryKeyValueStore::new());
        backing.set(AUTH_TOKEN_KEY, "").await.unwrap();

        let tokens = TokenStore::new(backing);
        assert_eq!(tokens.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_backing_store() {
        let tokens = store();
        let clone = tokens.clone();
        tokens.save("shared").await.unwrap();
        assert_eq!(clone.require().await.unwrap(), "shared");
    }

    #[tokio::test]
    async fn test_custom_key_is_used() {
        let mut mock = MockStore::new();
        mock.expect_get()
            .withf(|key| key.to_string() == "hub_token")
            .times(1)
            .returning(|_| Ok(Some("abc".to_string())));

        let tokens = TokenStore::with_key(Arc::new(mock), "hub_token");
        assert_eq!(tokens.key(), "hub_token");
        assert_eq!(tokens.get().await.unwrap(), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let mut mock = MockStore::new();
        mock.expect_set()
            .returning(|_, _| Err(BridgeError::NotAvailable("localStorage".to_string())));

        let tokens = TokenStore::new(Arc::new(mock));
        let err = tokens.save("abc").await.unwrap_err();
        assert!(matches!(err, AuthError::StorageUnavailable(_)));
        assert!(!err.to_string().contains("abc"));
    }
}
