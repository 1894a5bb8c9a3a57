//! # Request Facade
//!
//! [`RequestClient`] is the single entry point UI code calls. It resolves the
//! URL, builds a [`RequestDescriptor`], hands it to whichever [`Transport`]
//! the composition root injected and converts the decoded body into the
//! caller's type.
//!
//! ```no_run
//! use core_request::{RequestClient, RequestOptions};
//! use bridge_traits::HttpMethod;
//! # use std::sync::Arc;
//! # async fn example(client: RequestClient) -> core_request::Result<()> {
//! #[derive(serde::Deserialize)]
//! struct NodeInfo { height: u64 }
//!
//! let info: Option<NodeInfo> = client.get("/api/info").await?;
//!
//! let options = RequestOptions::new(HttpMethod::Post).json(&serde_json::json!({"amount": 1000}))?;
//! let _: Option<serde_json::Value> = client.request("/api/invoices", Some(options)).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use bridge_traits::HttpMethod;
use chrono::Utc;
use core_runtime::config::TransportKind;
use core_runtime::logging::redact_if_sensitive;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn, Instrument};
use url::Url;
use uuid::Uuid;

use crate::descriptor::{RequestDescriptor, RequestOptions};
use crate::error::{RequestError, Result};
use crate::transport::Transport;

/// The request facade.
///
/// Cheap to clone; clones share the injected transport.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    base_url: Option<Url>,
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("transport", &self.transport.kind())
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl RequestClient {
    /// Creates a facade that passes URLs to the transport unchanged.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
        }
    }

    /// Joins relative URLs (`/api/...`) onto `base_url`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolves `url` against the base URL.
    ///
    /// Absolute URLs pass through. Relative URLs pass through unchanged when
    /// no base URL is configured, since a host router may resolve them itself.
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        if url.trim().is_empty() {
            return Err(RequestError::InvalidUrl("URL cannot be empty".to_string()));
        }

        if Url::parse(url).is_ok() {
            return Ok(url.to_string());
        }

        match &self.base_url {
            Some(base) => base
                .join(url)
                .map(String::from)
                .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", url, e))),
            None => Ok(url.to_string()),
        }
    }

    /// Perform one request and decode the response body into `T`.
    ///
    /// `None` options mean GET with no body. Resolves to `Ok(None)` when the
    /// backend returned no body.
    ///
    /// # Errors
    ///
    /// Any transport failure is returned as-is; a body that does not fit `T`
    /// is `RequestError::Decode`.
    pub async fn request<T>(&self, url: &str, options: Option<RequestOptions>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let descriptor = RequestDescriptor::new(self.resolve_url(url)?, options);
        let request_id = Uuid::new_v4();

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %descriptor.method,
            url = %descriptor.url,
            transport = %self.transport.kind(),
        );

        async move {
            debug!(headers = ?loggable_headers(&descriptor.headers), "Dispatching request");
            let started = Utc::now();

            let outcome = self.transport.send(&descriptor).await;
            let elapsed_ms = (Utc::now() - started).num_milliseconds();

            let body = match outcome {
                Ok(body) => body,
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "Request failed");
                    return Err(err);
                }
            };

            info!(has_body = body.is_some(), elapsed_ms, "Request completed");

            body.map(|value| {
                serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
            })
            .transpose()
        }
        .instrument(span)
        .await
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        self.request(url, None).await
    }

    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Post, url, body).await
    }

    pub async fn put_json<B, T>(&self, url: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Put, url, body).await
    }

    pub async fn patch_json<B, T>(&self, url: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Patch, url, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        self.request(url, Some(RequestOptions::new(HttpMethod::Delete)))
            .await
    }

    async fn send_json<B, T>(&self, method: HttpMethod, url: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new(method).json(body)?;
        self.request(url, Some(options)).await
    }
}

/// Header map as it may appear in logs, with credential values redacted.
fn loggable_headers(headers: &BTreeMap<String, String>) -> BTreeMap<&str, String> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str(), redact_if_sensitive(name, value)))
        .collect()
}
