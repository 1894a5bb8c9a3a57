//! WebAssembly implementation of the `HttpClient` bridge trait.
//!
//! This client forwards requests to the browser's `fetch` API and converts the
//! resulting `Response` objects back into the bridge-friendly `HttpResponse`
//! type. One fetch per call; no retries or timeouts.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use bytes::Bytes;
use js_sys::{try_iter, Array, Uint8Array};
use std::collections::HashMap;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

use crate::error::js_error;

/// WebAssembly HTTP client backed by the browser's `fetch` API.
pub struct WasmHttpClient {
    window: Window,
}

impl WasmHttpClient {
    /// Create a new client bound to the current browser window.
    pub fn new() -> BridgeResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".to_string()))?;
        Ok(Self { window })
    }

    fn build_request(&self, request: &HttpRequest) -> BridgeResult<Request> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);

        if let Some(body) = &request.body {
            let body_array = Uint8Array::from(body.as_ref());
            init.set_body(&JsValue::from(body_array));
        }

        let headers = web_sys::Headers::new().map_err(|err| js_error("create headers", err))?;
        for (key, value) in &request.headers {
            headers
                .set(key, value)
                .map_err(|err| js_error("set header", err))?;
        }
        init.set_headers(&headers);

        Request::new_with_str_and_init(&request.url, &init)
            .map_err(|err| js_error("build request", err))
    }

    async fn read_body(response: &Response) -> BridgeResult<Bytes> {
        let promise = response
            .array_buffer()
            .map_err(|err| js_error("response.array_buffer", err))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|err| js_error("response buffer", err))?;
        let array = Uint8Array::new(&buffer);
        let mut bytes = vec![0u8; array.length() as usize];
        array.copy_to(&mut bytes);
        Ok(Bytes::from(bytes))
    }

    fn collect_headers(response: &Response) -> BridgeResult<HashMap<String, String>> {
        let headers = response.headers();
        let iterator = try_iter(&JsValue::from(headers))
            .map_err(|err| js_error("iterate headers", err))?
            .ok_or_else(|| BridgeError::OperationFailed("Headers iterator unavailable".into()))?;

        let mut map = HashMap::new();
        for entry in iterator {
            let entry = entry.map_err(|err| js_error("header iteration", err))?;
            let pair = Array::from(&entry);
            if pair.length() >= 2 {
                if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string())
                {
                    map.insert(key, value);
                }
            }
        }

        Ok(map)
    }
}

#[async_trait(?Send)]
impl HttpClient for WasmHttpClient {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let req = self.build_request(&request)?;

        let response = JsFuture::from(self.window.fetch_with_request(&req))
            .await
            .map_err(|err| js_error("fetch", err))?
            .dyn_into::<Response>()
            .map_err(|_| BridgeError::OperationFailed("fetch returned non-Response".into()))?;

        let body = Self::read_body(&response).await?;
        let headers = Self::collect_headers(&response)?;

        tracing::debug!(url = %request.url, status = response.status(), "fetch completed");

        Ok(HttpResponse {
            status: response.status(),
            headers,
            body,
        })
    }
}
