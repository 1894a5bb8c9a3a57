//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`
//! - `HostRouter` as an in-process router performing requests through any
//!   `HttpClient` (the desktop host side of the bridged transport)
//! - `KeyValueStore` as a JSON file under the platform config directory
//! - `KeyValueStore` using the `keyring` crate (feature `secure-store`)
//!
//! ## Feature Flags
//!
//! - `secure-store`: Enable OS keychain integration
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopHostRouter, FileKeyValueStore, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! let http = Arc::new(ReqwestHttpClient::new()?);
//! let store = FileKeyValueStore::in_config_dir("hub")?;
//! let router = DesktopHostRouter::new(http.clone())
//!     .with_base_url("http://localhost:8080".parse()?);
//! ```

mod file_store;
mod http;
mod router;

#[cfg(feature = "secure-store")]
mod secure_store;

pub use file_store::FileKeyValueStore;
pub use http::ReqwestHttpClient;
pub use router::DesktopHostRouter;

#[cfg(feature = "secure-store")]
pub use secure_store::KeyringKeyValueStore;
