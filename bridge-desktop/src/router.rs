//! In-process Host Router
//!
//! Plays the role of the privileged desktop host: receives the three-field
//! RPC `(url, method, body)`, performs the HTTP call itself and answers with a
//! [`ResponseEnvelope`]. Proxied failures are reported inside the envelope;
//! this router never fails the RPC call itself.
//!
//! The host owns the session. It attaches either a fixed token or, with
//! [`DesktopHostRouter::with_session_store`], whatever token is persisted
//! under the session key when the call is routed, so a login through the
//! client's token store is visible to the next proxied request.

use async_trait::async_trait;
use bridge_traits::{
    decode::describe_failure,
    error::Result,
    host::{HostRouter, ResponseEnvelope},
    http::{HttpClient, HttpMethod, HttpRequest},
    storage::KeyValueStore,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

enum HostSession {
    Anonymous,
    Fixed(String),
    Stored {
        store: Arc<dyn KeyValueStore>,
        key: String,
    },
}

impl HostSession {
    fn describe(&self) -> &'static str {
        match self {
            HostSession::Anonymous => "anonymous",
            HostSession::Fixed(_) => "fixed",
            HostSession::Stored { .. } => "stored",
        }
    }
}

pub struct DesktopHostRouter {
    http: Arc<dyn HttpClient>,
    base_url: Option<Url>,
    session: HostSession,
}

impl std::fmt::Debug for DesktopHostRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopHostRouter")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("session", &self.session.describe())
            .finish()
    }
}

impl DesktopHostRouter {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: None,
            session: HostSession::Anonymous,
        }
    }

    /// Origin that relative paths such as `/api/info` are resolved against.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Fixed session token the host attaches to every proxied call.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.session = HostSession::Fixed(token.into());
        self
    }

    /// Reads the session token from `store` under `key` on every call.
    ///
    /// An absent or empty value sends the request unauthenticated.
    pub fn with_session_store(
        mut self,
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        self.session = HostSession::Stored {
            store,
            key: key.into(),
        };
        self
    }

    async fn session_token(&self) -> std::result::Result<Option<String>, String> {
        match &self.session {
            HostSession::Anonymous => Ok(None),
            HostSession::Fixed(token) => Ok(Some(token.clone())),
            HostSession::Stored { store, key } => store
                .get(key)
                .await
                .map(|token| token.filter(|token| !token.trim().is_empty()))
                .map_err(|e| format!("Session storage unavailable: {}", e)),
        }
    }

    fn resolve_url(&self, url: &str) -> std::result::Result<String, String> {
        if Url::parse(url).is_ok() {
            return Ok(url.to_string());
        }

        match &self.base_url {
            Some(base) => base
                .join(url)
                .map(String::from)
                .map_err(|e| format!("Invalid URL '{}': {}", url, e)),
            None => Err(format!("Relative URL '{}' but no base URL configured", url)),
        }
    }

    async fn build_request(
        &self,
        url: &str,
        method: &str,
        body: &str,
    ) -> std::result::Result<HttpRequest, String> {
        let method = method.parse::<HttpMethod>().map_err(|e| e.to_string())?;
        let mut request = HttpRequest::new(method, self.resolve_url(url)?);

        if let Some(token) = self.session_token().await? {
            request = request.bearer_token(token);
        }

        if !body.is_empty() {
            if is_json_document(body) {
                request = request.header("Content-Type", "application/json");
            }
            request = request.body(Bytes::from(body.to_string()));
        }

        Ok(request)
    }

    async fn dispatch(&self, url: &str, method: &str, body: &str) -> ResponseEnvelope {
        let request = match self.build_request(url, method, body).await {
            Ok(request) => request,
            Err(message) => {
                warn!(url, method, error = %message, "Rejected host request");
                return ResponseEnvelope::failure(message);
            }
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, method, error = %e, "Host request failed");
                return ResponseEnvelope::failure(e.to_string());
            }
        };

        if !response.is_success() {
            debug!(
                url,
                method,
                status = response.status,
                "Host request returned error status"
            );
            return ResponseEnvelope::failure(describe_failure(&response));
        }

        match response.decoded_body() {
            Ok(body) => ResponseEnvelope::success(body),
            Err(e) => {
                warn!(url, method, error = %e, "Host could not decode response body");
                ResponseEnvelope::failure(e.envelope_message())
            }
        }
    }
}

/// Only objects and arrays are tagged as JSON; bare scalars such as `42`
/// travel untagged, as they do on the direct path.
fn is_json_document(body: &str) -> bool {
    let trimmed = body.trim_start();
    (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(body).is_ok()
}

#[async_trait]
impl HostRouter for DesktopHostRouter {
    async fn route(&self, url: &str, method: &str, body: &str) -> Result<ResponseEnvelope> {
        Ok(self.dispatch(url, method, body).await)
    }
}
