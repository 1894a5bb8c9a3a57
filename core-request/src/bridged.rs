//! Bridged transport: the privileged host performs HTTP on the client's behalf.

use std::sync::Arc;

use bridge_traits::decode::decode_failure_detail;
use bridge_traits::host::HostRouter;
use core_runtime::config::TransportKind;
use serde_json::Value;
use tracing::{debug, warn};

use crate::descriptor::RequestDescriptor;
use crate::error::{RequestError, Result};
use crate::transport::Transport;

/// Forwards `(url, method, body)` to a [`HostRouter`] and unwraps the envelope.
///
/// The host owns the session in this mode, so no token is read here.
pub struct BridgedTransport {
    router: Arc<dyn HostRouter>,
}

impl BridgedTransport {
    pub fn new(router: Arc<dyn HostRouter>) -> Self {
        Self { router }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Transport for BridgedTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Bridged
    }

    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        if !request.headers.is_empty() {
            debug!(
                url = %request.url,
                dropped = request.headers.len(),
                "Host router does not carry headers; dropping them"
            );
        }

        let envelope = self
            .router
            .route(&request.url, request.method.as_str(), request.body_str())
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        // The error field wins; the body is not inspected when it is set.
        if let Some(error) = envelope.error_message() {
            warn!(url = %request.url, "Host router reported a failure");
            return Err(match decode_failure_detail(error) {
                Some(detail) => RequestError::Decode(detail.to_string()),
                None => RequestError::Host(error.to_string()),
            });
        }

        Ok(envelope.body.filter(|body| !body.is_null()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestOptions;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::host::ResponseEnvelope;
    use bridge_traits::HttpMethod;
    use mockall::mock;
    use serde_json::json;

    mock! {
        Router {}

        #[async_trait]
        impl HostRouter for Router {
            async fn route(&self, url: &str, method: &str, body: &str) -> BridgeResult<ResponseEnvelope>;
        }
    }

    #[tokio::test]
    async fn test_error_wins_over_body() {
        let mut router = MockRouter::new();
        router.expect_route().returning(|_, _, _| {
            Ok(serde_json::from_value(json!({"error": "x", "body": {"ignored": true}})).unwrap())
        });

        let transport = BridgedTransport::new(Arc::new(router));
        let err = transport
            .send(&RequestDescriptor::new("/api/info", None))
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Host(ref message) if message == "x"));
    }

    #[tokio::test]
    async fn test_host_decode_failure_is_decode_error() {
        let mut router = MockRouter::new();
        router.expect_route().returning(|_, _, _| {
            let err = bridge_traits::decode_body(Some("application/json"), b"{truncated")
                .unwrap_err();
            Ok(ResponseEnvelope::failure(err.envelope_message()))
        });

        let transport = BridgedTransport::new(Arc::new(router));
        let err = transport
            .send(&RequestDescriptor::new("/api/info", None))
            .await
            .unwrap_err();

        match &err {
            RequestError::Decode(message) => assert!(message.starts_with("Invalid JSON body")),
            other => panic!("expected a decode error, got {other:?}"),
        }
        assert!(!err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_body_is_resolved() {
        let mut router = MockRouter::new();
        router
            .expect_route()
            .returning(|_, _, _| Ok(ResponseEnvelope::success(Some(json!({"height": 100})))));

        let transport = BridgedTransport::new(Arc::new(router));
        let body = transport
            .send(&RequestDescriptor::new("/api/info", None))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({"height": 100})));
    }

    #[tokio::test]
    async fn test_defaults_to_get_and_empty_body() {
        let mut router = MockRouter::new();
        router
            .expect_route()
            .withf(|url, method, body| {
                url.to_string() == "/api/info" && method.to_string() == "GET" && body.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(ResponseEnvelope::success(None)));

        let transport = BridgedTransport::new(Arc::new(router));
        let body = transport
            .send(&RequestDescriptor::new("/api/info", None))
            .await
            .unwrap();

        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_json_body_sent_as_string() {
        let mut router = MockRouter::new();
        router
            .expect_route()
            .withf(|_, method, body| {
                method.to_string() == "POST"
                    && serde_json::from_str::<Value>(body).ok() == Some(json!({"amount": 21}))
            })
            .times(1)
            .returning(|_, _, _| Ok(ResponseEnvelope::success(Some(json!({"ok": true})))));

        let options = RequestOptions::new(HttpMethod::Post)
            .json(&json!({"amount": 21}))
            .unwrap();
        let transport = BridgedTransport::new(Arc::new(router));
        let body = transport
            .send(&RequestDescriptor::new("/api/invoices", Some(options)))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_empty_error_string_is_success() {
        let mut router = MockRouter::new();
        router.expect_route().returning(|_, _, _| {
            Ok(ResponseEnvelope {
                body: Some(json!("done")),
                error: Some(String::new()),
            })
        });

        let transport = BridgedTransport::new(Arc::new(router));
        let body = transport
            .send(&RequestDescriptor::new("/api/sync", None))
            .await
            .unwrap();

        assert_eq!(body, Some(json!("done")));
    }

    #[tokio::test]
    async fn test_channel_failure_is_transport_error() {
        let mut router = MockRouter::new();
        router.expect_route().returning(|_, _, _| {
            Err(BridgeError::NotAvailable("host router not injected".into()))
        });

        let transport = BridgedTransport::new(Arc::new(router));
        let err = transport
            .send(&RequestDescriptor::new("/api/info", None))
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Transport(_)));
        assert_eq!(transport.kind(), TransportKind::Bridged);
    }
}
