//! Per-call request options and the immutable descriptor built from them.

use std::collections::BTreeMap;

use bridge_traits::HttpMethod;
use serde::Serialize;

use crate::error::{RequestError, Result};

/// Caller-supplied options for a single request.
///
/// Everything is optional: `RequestOptions::default()` is a GET with no body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    /// Raw string body, sent as-is.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` to a JSON string body and sets `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Encode` if `value` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, value: &B) -> Result<Self> {
        let body = serde_json::to_string(value).map_err(|e| RequestError::Encode(e.to_string()))?;
        self.body = Some(body);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// One fully resolved request, handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Builds the descriptor, defaulting the method to GET.
    pub fn new(url: impl Into<String>, options: Option<RequestOptions>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            url: url.into(),
            method: options.method.unwrap_or_default(),
            body: options.body,
            headers: options.headers,
        }
    }

    /// The body as the host RPC expects it: the empty string when absent.
    pub fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_options_is_get_without_body() {
        let descriptor = RequestDescriptor::new("/api/info", None);
        assert_eq!(descriptor.method, HttpMethod::Get);
        assert_eq!(descriptor.body, None);
        assert_eq!(descriptor.body_str(), "");
        assert!(descriptor.headers.is_empty());
    }

    #[test]
    fn test_json_options() {
        let options = RequestOptions::new(HttpMethod::Post)
            .json(&json!({"amount": 1000, "description": "coffee"}))
            .unwrap()
            .header("X-Request-Source", "settings");

        let descriptor = RequestDescriptor::new("/api/invoices", Some(options));
        assert_eq!(descriptor.method, HttpMethod::Post);
        assert_eq!(
            descriptor.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let sent: serde_json::Value = serde_json::from_str(descriptor.body_str()).unwrap();
        assert_eq!(sent, json!({"amount": 1000, "description": "coffee"}));
    }

    #[test]
    fn test_raw_body_is_untouched() {
        let options = RequestOptions::new(HttpMethod::Put).body("plain text");
        let descriptor = RequestDescriptor::new("/api/alias", Some(options));
        assert_eq!(descriptor.body_str(), "plain text");
        assert!(!descriptor.headers.contains_key("Content-Type"));
    }
}
