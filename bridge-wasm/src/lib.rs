//! WebAssembly Bridge Implementations
//!
//! This crate provides WebAssembly-compatible implementations of the bridge traits
//! defined in `bridge-traits`. These implementations use browser APIs through
//! `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - `WasmHttpClient`: `fetch`-based HTTP for the direct transport
//! - `WailsHostRouter`: calls the router function injected by the desktop host
//! - `LocalStorageKeyValueStore`: namespaced `localStorage` for the bearer token
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::{build_wasm_bridges, WasmBridgeConfig};
//!
//! let bridges = build_wasm_bridges(WasmBridgeConfig::new("hub"))?;
//! if let Some(router) = bridges.host_router() {
//!     let envelope = router.route("/api/info", "GET", "").await?;
//! }
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod error;
pub mod http;
pub mod router;
pub mod storage;

// Re-export commonly used types
pub use bootstrap::{build_wasm_bridges, WasmBridgeConfig, WasmBridgeSet};
pub use error::{WasmError, WasmResult};
pub use http::WasmHttpClient;
pub use router::{WailsHostRouter, DEFAULT_ROUTER_PATH};
pub use storage::LocalStorageKeyValueStore;
