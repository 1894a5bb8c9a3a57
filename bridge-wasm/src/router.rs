//! `HostRouter` backed by the function the desktop host injects into the page.
//!
//! When the web client runs inside the desktop shell, the host exposes an
//! async function (by default `window.go.main.App.WailsRequestRouter`) taking
//! `(url, method, body)` and resolving to `{ body?, error? }`.

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult,
    host::{HostRouter, ResponseEnvelope},
};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::{js_error, WasmError, WasmResult};

/// Global path of the router function injected by the desktop host.
pub const DEFAULT_ROUTER_PATH: &str = "go.main.App.WailsRequestRouter";

/// Calls the host-injected router function.
#[derive(Debug, Clone)]
pub struct WailsHostRouter {
    path: String,
}

impl WailsHostRouter {
    /// Router bound to [`DEFAULT_ROUTER_PATH`].
    pub fn new() -> Self {
        Self::with_path(DEFAULT_ROUTER_PATH)
    }

    /// Router bound to a dotted global path such as `host.api.route`.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The dotted global path this router calls.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the host function is present on the page.
    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }

    /// Walks the dotted path from the global object, returning the receiver
    /// and the function so the call keeps its `this`.
    fn resolve(&self) -> WasmResult<(JsValue, Function)> {
        let missing = || WasmError::NotAvailable(format!("host router `{}`", self.path));

        let mut receiver = JsValue::UNDEFINED;
        let mut current: JsValue = js_sys::global().into();
        for segment in self.path.split('.').filter(|s| !s.is_empty()) {
            let next = Reflect::get(&current, &JsValue::from_str(segment))?;
            if next.is_undefined() || next.is_null() {
                return Err(missing());
            }
            receiver = current;
            current = next;
        }

        let function = current.dyn_into::<Function>().map_err(|_| missing())?;
        Ok((receiver, function))
    }
}

impl Default for WailsHostRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl HostRouter for WailsHostRouter {
    async fn route(&self, url: &str, method: &str, body: &str) -> BridgeResult<ResponseEnvelope> {
        let (receiver, function) = self.resolve()?;

        let returned = function
            .call3(
                &receiver,
                &JsValue::from_str(url),
                &JsValue::from_str(method),
                &JsValue::from_str(body),
            )
            .map_err(|err| js_error("host router call", err))?;

        let value = match returned.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map_err(|err| js_error("host router promise", err))?,
            Err(value) => value,
        };

        if value.is_undefined() || value.is_null() {
            return Ok(ResponseEnvelope::default());
        }

        let envelope: ResponseEnvelope =
            serde_wasm_bindgen::from_value(value).map_err(WasmError::from)?;
        Ok(envelope)
    }
}
