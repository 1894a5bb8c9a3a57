//! # Client Configuration
//!
//! Builder-based configuration for the Hub request layer.
//!
//! ## Overview
//!
//! `ClientConfig` names the backend, picks which transport the composition
//! root wires behind the request facade, and carries the storage and logging
//! settings the platform adapters need. The builder validates eagerly so a
//! misconfigured client fails at startup rather than on its first request.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{ClientConfig, TransportKind};
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:8080")
//!     .transport(TransportKind::Bridged)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.transport, TransportKind::Bridged);
//! ```
//!
//! ## Environment
//!
//! [`ClientConfig::from_env`] reads:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `HUB_BASE_URL` | Backend origin (required) |
//! | `HUB_TRANSPORT` | `direct` or `bridged` |
//! | `HUB_AUTH_KEY` | Storage key for the bearer token |
//! | `HUB_LOG` | Log filter directive string |

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Storage key the bearer token is persisted under unless overridden.
pub const DEFAULT_AUTH_KEY: &str = "token";

/// Storage namespace used by adapters that share a backing store.
pub const DEFAULT_NAMESPACE: &str = "hub";

/// Which transport the composition root places behind the request facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// The client performs HTTP itself.
    #[default]
    Direct,
    /// HTTP is delegated to the privileged desktop host.
    Bridged,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Direct => f.write_str("direct"),
            TransportKind::Bridged => f.write_str("bridged"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "http" => Ok(TransportKind::Direct),
            "bridged" | "wails" | "host" => Ok(TransportKind::Bridged),
            other => Err(Error::Config(format!(
                "Unknown transport '{}': expected 'direct' or 'bridged'",
                other
            ))),
        }
    }
}

/// Validated configuration for the request layer.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin that relative request paths (e.g. `/api/info`) are joined onto
    pub base_url: Url,

    /// Transport variant selected once at startup
    pub transport: TransportKind,

    /// Key the bearer token is stored under
    pub auth_key: String,

    /// User agent sent by native HTTP clients
    pub user_agent: String,

    /// Namespace for shared storage backends (localStorage, config files)
    pub namespace: String,

    pub logging: LoggingConfig,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from `HUB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(base_url) = lookup("HUB_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        if let Some(transport) = lookup("HUB_TRANSPORT") {
            builder = builder.transport(transport.parse()?);
        }
        if let Some(auth_key) = lookup("HUB_AUTH_KEY") {
            builder = builder.auth_key(auth_key);
        }
        if let Some(filter) = lookup("HUB_LOG") {
            builder = builder.logging(LoggingConfig::default().with_filter(filter));
        }

        builder.build()
    }

    /// Checks the invariants the builder cannot express in types.
    pub fn validate(&self) -> Result<()> {
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "Base URL must use http or https, got '{}'",
                    other
                )))
            }
        }

        if self.auth_key.trim().is_empty() {
            return Err(Error::Config("Auth storage key cannot be empty".to_string()));
        }

        if self.namespace.trim().is_empty() {
            return Err(Error::Config("Storage namespace cannot be empty".to_string()));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    transport: Option<TransportKind>,
    auth_key: Option<String>,
    user_agent: Option<String>,
    namespace: Option<String>,
    logging: Option<LoggingConfig>,
}

impl ClientConfigBuilder {
    /// Sets the backend origin, e.g. `http://localhost:8080`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = Some(key.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the base URL is missing or unparseable,
    /// or when any validated field is empty.
    pub fn build(self) -> Result<ClientConfig> {
        let raw_url = self.base_url.ok_or_else(|| {
            Error::Config(
                "Base URL is required. Set it with ClientConfig::builder().base_url(..) \
                 or the HUB_BASE_URL environment variable."
                    .to_string(),
            )
        })?;

        let base_url = Url::parse(raw_url.trim())
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw_url, e)))?;

        let config = ClientConfig {
            base_url,
            transport: self.transport.unwrap_or_default(),
            auth_key: self
                .auth_key
                .unwrap_or_else(|| DEFAULT_AUTH_KEY.to_string()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("hub-client/{}", env!("CARGO_PKG_VERSION"))),
            namespace: self
                .namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            logging: self.logging.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
