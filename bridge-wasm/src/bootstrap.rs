//! Convenience helpers for wiring the wasm bridge implementations together.
//!
//! Host shells can use [`build_wasm_bridges`] to construct the HTTP client,
//! token storage and (when running inside the desktop shell) the host router
//! without writing repetitive glue code. The result mirrors the role that the
//! `bridge-desktop` crate plays for native targets.

use std::sync::Arc;

use bridge_traits::{
    error::Result as BridgeResult, host::HostRouter, http::HttpClient, storage::KeyValueStore,
};
use tracing::debug;

use crate::{
    http::WasmHttpClient,
    router::{WailsHostRouter, DEFAULT_ROUTER_PATH},
    storage::LocalStorageKeyValueStore,
};

/// Configuration for [`build_wasm_bridges`].
#[derive(Debug, Clone)]
pub struct WasmBridgeConfig {
    /// Logical namespace used for `localStorage` key prefixes.
    pub namespace: String,
    /// Dotted global path of the host router function.
    pub router_path: String,
}

impl WasmBridgeConfig {
    /// Create a new config using the provided namespace and the default
    /// router path.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            router_path: DEFAULT_ROUTER_PATH.to_string(),
        }
    }

    /// Override the host router path.
    pub fn with_router_path(mut self, router_path: impl Into<String>) -> Self {
        self.router_path = router_path.into();
        self
    }
}

impl Default for WasmBridgeConfig {
    fn default() -> Self {
        Self::new("hub")
    }
}

/// Fully constructed wasm bridge objects ready for injection into the core.
pub struct WasmBridgeSet {
    /// HTTP client powered by browser `fetch`.
    pub http_client: Arc<dyn HttpClient>,
    /// Namespaced `localStorage` store.
    pub key_value_store: Arc<dyn KeyValueStore>,
    /// Router into the desktop host, present only when the host injected it.
    pub host_router: Option<Arc<dyn HostRouter>>,
}

impl WasmBridgeSet {
    /// Convenience accessor to clone the HTTP client.
    pub fn http(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.http_client)
    }

    /// Convenience accessor to clone the key-value store.
    pub fn key_value_store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.key_value_store)
    }

    /// Convenience accessor to clone the host router, if any.
    pub fn host_router(&self) -> Option<Arc<dyn HostRouter>> {
        self.host_router.clone()
    }
}

/// Build the default wasm bridge stack.
///
/// Hosts should call this during startup and pass the returned trait objects
/// into `core-service`.
pub fn build_wasm_bridges(config: WasmBridgeConfig) -> BridgeResult<WasmBridgeSet> {
    let http_client: Arc<dyn HttpClient> = Arc::new(WasmHttpClient::new()?);
    let key_value_store: Arc<dyn KeyValueStore> =
        Arc::new(LocalStorageKeyValueStore::new(&config.namespace)?);

    let router = WailsHostRouter::with_path(&config.router_path);
    let host_router: Option<Arc<dyn HostRouter>> = if router.is_available() {
        debug!(path = %config.router_path, "Desktop host router detected");
        Some(Arc::new(router))
    } else {
        None
    };

    Ok(WasmBridgeSet {
        http_client,
        key_value_store,
        host_router,
    })
}
