//! Workspace umbrella crate.
//!
//! Exposes the feature flags that map onto the individual workspace crates so
//! host applications can depend on `hub-client` alone and pick a platform
//! (`desktop-shims` or `wasm`) without wiring each crate themselves.

#[cfg(any(feature = "desktop-shims", feature = "secure-store", feature = "wasm"))]
pub use core_service::*;
