//! Direct transport: the client performs HTTP itself.

use std::sync::Arc;

use bridge_traits::decode::failure_message;
use bridge_traits::http::{HttpClient, HttpRequest};
use bytes::Bytes;
use core_auth::TokenStore;
use core_runtime::config::TransportKind;
use serde_json::Value;
use tracing::{debug, warn};

use crate::descriptor::RequestDescriptor;
use crate::error::{RequestError, Result};
use crate::transport::Transport;

/// Sends requests through an [`HttpClient`], attaching the stored bearer token.
///
/// The token is read at dispatch time, so a login or logout takes effect on
/// the next request without rebuilding the transport.
pub struct DirectTransport {
    http: Arc<dyn HttpClient>,
    tokens: TokenStore,
}

impl DirectTransport {
    pub fn new(http: Arc<dyn HttpClient>, tokens: TokenStore) -> Self {
        Self { http, tokens }
    }

    async fn build_request(&self, request: &RequestDescriptor) -> Result<HttpRequest> {
        let mut http_request = HttpRequest::new(request.method, request.url.clone());

        for (name, value) in &request.headers {
            http_request = http_request.header(name.clone(), value.clone());
        }

        if let Some(token) = self.tokens.get().await? {
            http_request = http_request.bearer_token(token);
        } else {
            debug!(url = %request.url, "No bearer token stored; sending unauthenticated request");
        }

        if let Some(body) = &request.body {
            http_request = http_request.body(Bytes::from(body.clone()));
        }

        Ok(http_request)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Transport for DirectTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Direct
    }

    async fn send(&self, request: &RequestDescriptor) -> Result<Option<Value>> {
        let http_request = self.build_request(request).await?;

        let response = self
            .http
            .execute(http_request)
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !response.is_success() {
            let message = failure_message(&response);
            warn!(
                url = %request.url,
                status = response.status,
                "Backend rejected request"
            );
            return Err(RequestError::Status {
                status: response.status,
                message,
            });
        }

        Ok(response.decoded_body()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpMethod, HttpResponse};
    use bridge_traits::InMemoryKeyValueStore;
    use mockall::mock;
    use serde_json::json;
    use std::collections::HashMap;

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }
    }

    fn tokens() -> TokenStore {
        TokenStore::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let tokens = tokens();
        tokens.save("secret-token").await.unwrap();

        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|request| {
                request.headers.get("Authorization").map(String::as_str)
                    == Some("Bearer secret-token")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"height": 100}"#)));

        let transport = DirectTransport::new(Arc::new(http), tokens);
        let body = transport
            .send(&RequestDescriptor::new("http://hub/api/info", None))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({"height": 100})));
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization_header() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|request| {
                !request.headers.contains_key("Authorization")
                    && request.method == HttpMethod::Get
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(json_response(200, "")));

        let transport = DirectTransport::new(Arc::new(http), tokens());
        let body = transport
            .send(&RequestDescriptor::new("http://hub/api/info", None))
            .await
            .unwrap();

        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_non_success_status_carries_backend_message() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .returning(|_| Ok(json_response(400, r#"{"message": "amount too low"}"#)));

        let transport = DirectTransport::new(Arc::new(http), tokens());
        let err = transport
            .send(&RequestDescriptor::new("http://hub/api/invoices", None))
            .await
            .unwrap_err();

        match err {
            RequestError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "amount too low");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_failure_is_transport_error() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .returning(|_| Err(BridgeError::OperationFailed("connection refused".into())));

        let transport = DirectTransport::new(Arc::new(http), tokens());
        let err = transport
            .send(&RequestDescriptor::new("http://hub/api/info", None))
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Transport(ref m) if m.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .returning(|_| Ok(json_response(200, "{truncated")));

        let transport = DirectTransport::new(Arc::new(http), tokens());
        let err = transport
            .send(&RequestDescriptor::new("http://hub/api/info", None))
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_body_and_headers_forwarded() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|request| {
                request.method == HttpMethod::Post
                    && request.headers.get("Content-Type").map(String::as_str)
                        == Some("application/json")
                    && request.body.as_deref() == Some(br#"{"amount":1}"#.as_slice())
            })
            .times(1)
            .returning(|_| Ok(json_response(201, r#"{"id": "inv_1"}"#)));

        let options = crate::RequestOptions::new(HttpMethod::Post)
            .json(&json!({"amount": 1}))
            .unwrap();
        let transport = DirectTransport::new(Arc::new(http), tokens());
        let body = transport
            .send(&RequestDescriptor::new("http://hub/api/invoices", Some(options)))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({"id": "inv_1"})));
        assert_eq!(transport.kind(), TransportKind::Direct);
    }
}
