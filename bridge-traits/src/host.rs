//! Privileged Host Router Abstraction
//!
//! When the client runs inside a desktop host, network I/O is performed by the
//! host process rather than by the client. The client hands the host exactly
//! three strings (URL, method, body) and receives a [`ResponseEnvelope`].
//! Changing this shape breaks interoperability with the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Wire shape returned by the host router.
///
/// `error` takes precedence: when it is non-empty the call failed and `body`
/// must not be inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Successful envelope carrying an already-decoded body.
    pub fn success(body: Option<Value>) -> Self {
        Self { body, error: None }
    }

    /// Failed envelope carrying a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            body: None,
            error: Some(message.into()),
        }
    }

    /// The error message, if the envelope reports a failure.
    ///
    /// An empty string counts as "no error".
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

/// RPC channel into the privileged host process.
///
/// Implementations:
/// - Browser inside the desktop host: calls the router function the host
///   injects into the page
/// - Native: an in-process router that performs the request itself
///
/// `Err` is reserved for failures of the RPC channel itself. Failures of the
/// proxied HTTP call are reported inside the envelope.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait HostRouter: PlatformSendSync {
    /// Forward one request to the host.
    async fn route(&self, url: &str, method: &str, body: &str) -> Result<ResponseEnvelope>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_from_host_json() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"body": {"height": 100}})).unwrap();
        assert_eq!(envelope.body, Some(json!({"height": 100})));
        assert_eq!(envelope.error_message(), None);

        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"error": "x", "body": {"ignored": true}})).unwrap();
        assert_eq!(envelope.error_message(), Some("x"));
    }

    #[test]
    fn test_empty_error_is_not_a_failure() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"body": null, "error": ""})).unwrap();
        assert_eq!(envelope.error_message(), None);
        assert_eq!(envelope.body, None);
    }

    #[test]
    fn test_envelope_serializes_without_absent_fields() {
        let encoded = serde_json::to_string(&ResponseEnvelope::failure("boom")).unwrap();
        assert_eq!(encoded, r#"{"error":"boom"}"#);

        let encoded = serde_json::to_string(&ResponseEnvelope::success(None)).unwrap();
        assert_eq!(encoded, "{}");
    }
}
