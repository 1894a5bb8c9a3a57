//! Hub client façade and bootstrap helpers.
//!
//! This crate is the composition root: it takes host-provided bridge
//! implementations (HTTP, host router, key-value storage), picks the transport
//! named by [`ClientConfig::transport`] exactly once, and hands back a
//! [`HubClient`]. Desktop apps typically enable the `desktop-shims` feature
//! (which depends on `bridge-desktop`), whereas WebAssembly builds enable the
//! `wasm` feature and rely on the adapters from `bridge-wasm`.
//!
//! Logging is not installed implicitly; hosts call [`HubClient::init_logging`]
//! (or [`init_logging`] directly) once at startup.

pub mod error;

pub use error::{CoreError, Result};

pub use bridge_traits::HttpMethod;
pub use core_auth::{AuthError, TokenStore, AUTH_TOKEN_KEY};
pub use core_request::{
    RequestClient, RequestDescriptor, RequestError, RequestOptions, Transport,
};
pub use core_runtime::config::{ClientConfig, ClientConfigBuilder, TransportKind};
pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};

use std::sync::Arc;

use bridge_traits::{host::HostRouter, http::HttpClient, storage::KeyValueStore};
use core_request::{BridgedTransport, DirectTransport};
use serde::de::DeserializeOwned;
use tracing::info;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use bridge_desktop::{DesktopHostRouter, ReqwestHttpClient};

#[cfg(feature = "wasm")]
pub use bridge_wasm::WasmBridgeConfig;
#[cfg(feature = "wasm")]
use bridge_wasm::{build_wasm_bridges, WasmBridgeSet};

/// Aggregated handle to the bridge dependencies the client may use.
///
/// Only the capabilities the configured transport needs must be present: an
/// HTTP client for `Direct`, a host router for `Bridged`.
pub struct HubDependencies {
    pub key_value_store: Arc<dyn KeyValueStore>,
    pub http_client: Option<Arc<dyn HttpClient>>,
    pub host_router: Option<Arc<dyn HostRouter>>,
}

impl HubDependencies {
    pub fn new(key_value_store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            key_value_store,
            http_client: None,
            host_router: None,
        }
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_host_router(mut self, host_router: Arc<dyn HostRouter>) -> Self {
        self.host_router = Some(host_router);
        self
    }
}

#[cfg(feature = "wasm")]
impl From<WasmBridgeSet> for HubDependencies {
    fn from(set: WasmBridgeSet) -> Self {
        Self {
            key_value_store: set.key_value_store,
            http_client: Some(set.http_client),
            host_router: set.host_router,
        }
    }
}

fn capability_missing(capability: &str, message: &str) -> CoreError {
    CoreError::CapabilityMissing {
        capability: capability.to_string(),
        message: message.to_string(),
    }
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct HubClient {
    config: Arc<ClientConfig>,
    tokens: TokenStore,
    requests: RequestClient,
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
            .field("transport", &self.config.transport)
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}

impl HubClient {
    /// Wire the configured transport from the provided dependencies.
    ///
    /// # Errors
    ///
    /// `CoreError::Config` for an invalid configuration and
    /// `CoreError::CapabilityMissing` when the transport's bridge is absent.
    pub fn new(config: ClientConfig, deps: HubDependencies) -> Result<Self> {
        config.validate()?;

        let tokens = TokenStore::with_key(deps.key_value_store, config.auth_key.clone());

        let requests = match config.transport {
            TransportKind::Direct => {
                let http = deps.http_client.ok_or_else(|| {
                    capability_missing("HttpClient", "the direct transport needs an HTTP client")
                })?;
                RequestClient::new(Arc::new(DirectTransport::new(http, tokens.clone())))
                    .with_base_url(config.base_url.clone())
            }
            // Paths go to the host untouched; it resolves them against its own origin.
            TransportKind::Bridged => {
                let router = deps.host_router.ok_or_else(|| {
                    capability_missing("HostRouter", "the bridged transport needs a host router")
                })?;
                RequestClient::new(Arc::new(BridgedTransport::new(router)))
            }
        };

        info!(
            transport = %config.transport,
            base_url = %config.base_url,
            "Hub client initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            tokens,
            requests,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.config.transport
    }

    /// The request facade.
    pub fn requests(&self) -> &RequestClient {
        &self.requests
    }

    /// The bearer token store shared with the direct transport.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Shorthand for [`RequestClient::request`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> core_request::Result<Option<T>> {
        self.requests.request(url, options).await
    }

    /// Persist the token issued at login.
    pub async fn login(&self, token: &str) -> Result<()> {
        self.tokens.save(token).await?;
        Ok(())
    }

    /// Forget the stored token.
    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear().await?;
        Ok(())
    }

    /// Install the global subscriber described by `config.logging`.
    ///
    /// Call once per process; `HUB_LOG` reaches the filter through here.
    pub fn init_logging(&self) -> Result<()> {
        init_logging(self.config.logging.clone())?;
        Ok(())
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// Uses `reqwest` for HTTP, the in-process [`DesktopHostRouter`] as the host
/// side of the bridged transport, and the OS keychain (feature
/// `secure-store`) or a JSON file under the config directory for the token.
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub fn bootstrap_desktop(config: ClientConfig) -> Result<HubClient> {
    let store = desktop_key_value_store(&config)?;
    bootstrap_desktop_with_store(config, store)
}

/// [`bootstrap_desktop`] over a caller-supplied token store.
///
/// The host router reads the session from the same store and key as the
/// client's [`TokenStore`], so [`HubClient::login`] authenticates both
/// transports.
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub fn bootstrap_desktop_with_store(
    config: ClientConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<HubClient> {
    let http: Arc<dyn HttpClient> = Arc::new(
        ReqwestHttpClient::with_user_agent(&config.user_agent)
            .map_err(|err| CoreError::InitializationFailed(err.to_string()))?,
    );
    let router: Arc<dyn HostRouter> = Arc::new(
        DesktopHostRouter::new(Arc::clone(&http))
            .with_base_url(config.base_url.clone())
            .with_session_store(Arc::clone(&store), config.auth_key.clone()),
    );

    let deps = HubDependencies::new(store)
        .with_http_client(http)
        .with_host_router(router);
    HubClient::new(config, deps)
}

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
fn desktop_key_value_store(config: &ClientConfig) -> Result<Arc<dyn KeyValueStore>> {
    #[cfg(feature = "secure-store")]
    {
        Ok(Arc::new(bridge_desktop::KeyringKeyValueStore::with_service_name(
            config.namespace.clone(),
        )))
    }

    #[cfg(not(feature = "secure-store"))]
    {
        let store = bridge_desktop::FileKeyValueStore::in_config_dir(&config.namespace)
            .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;
        Ok(Arc::new(store))
    }
}

/// Convenience bootstrapper for WebAssembly hosts.
///
/// When the page runs inside the desktop shell (the host router function is
/// present) the bridged transport is used regardless of `config.transport`.
///
/// ```
/// # #[cfg(feature = "wasm")]
/// # fn example() -> core_service::Result<()> {
/// use core_service::{bootstrap_wasm, ClientConfig, WasmBridgeConfig};
///
/// let config = ClientConfig::builder().base_url("http://localhost:8080").build()?;
/// let hub = bootstrap_wasm(config, WasmBridgeConfig::new("hub"))?;
/// let requests = hub.requests().clone();
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "wasm")]
pub fn bootstrap_wasm(mut config: ClientConfig, bridges: WasmBridgeConfig) -> Result<HubClient> {
    let bridges = build_wasm_bridges(bridges)
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;

    if bridges.host_router.is_some() {
        config.transport = TransportKind::Bridged;
    }

    HubClient::new(config, HubDependencies::from(bridges))
}
