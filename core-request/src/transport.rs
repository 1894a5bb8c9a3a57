//! Transport abstraction
//!
//! A transport carries one [`RequestDescriptor`] to the backend and returns
//! the decoded body. The composition root picks exactly one implementation at
//! startup and injects it into [`RequestClient`](crate::RequestClient):
//!
//! - [`DirectTransport`](crate::DirectTransport): native HTTP with the bearer token attached
//! - [`BridgedTransport`](crate::BridgedTransport): delegates to the privileged host

use bridge_traits::platform::PlatformSendSync;
use core_runtime::config::TransportKind;
use serde_json::Value;

use crate::descriptor::RequestDescriptor;
use crate::error::Result;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Transport: PlatformSendSync {
    /// Which variant this is, for logging.
    fn kind(&self) -> TransportKind;

    /// Perform the request.
    ///
    /// Resolves to `None` when the backend returned no body.
    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>>;
}
