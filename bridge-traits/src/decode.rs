//! Response Body Decoding
//!
//! The one content-negotiation rule shared by the direct transport and by
//! every host router, so both paths hand the caller the same
//! `serde_json::Value` for the same backend payload:
//!
//! 1. Empty (or whitespace-only) body: no value.
//! 2. `application/json` or any `+json` media type: parsed JSON.
//! 3. Anything else: the body text as a JSON string.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid JSON body: {0}")]
    Json(String),

    #[error("Response body is not valid UTF-8")]
    Utf8,
}

/// Leading text of an envelope error reporting a body the host could not decode.
///
/// Host routers prefix decode failures with it so the bridged transport can
/// classify them the same way the direct transport does.
pub const DECODE_FAILURE_PREFIX: &str = "Failed to decode response: ";

impl DecodeError {
    /// Envelope error text for this failure, carrying [`DECODE_FAILURE_PREFIX`].
    pub fn envelope_message(&self) -> String {
        format!("{DECODE_FAILURE_PREFIX}{self}")
    }
}

/// The decode error detail of an envelope error, when it reports one.
pub fn decode_failure_detail(envelope_error: &str) -> Option<&str> {
    envelope_error.strip_prefix(DECODE_FAILURE_PREFIX)
}

/// Whether a `Content-Type` value denotes JSON.
pub fn is_json_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type == "application/json" || media_type.ends_with("+json")
}

/// Decode a response body according to the shared rule.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<Option<Value>, DecodeError> {
    let text = std::str::from_utf8(body).map_err(|_| DecodeError::Utf8)?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    if content_type.is_some_and(is_json_content_type) {
        return serde_json::from_str(text)
            .map(Some)
            .map_err(|e| DecodeError::Json(e.to_string()));
    }

    Ok(Some(Value::String(text.to_string())))
}

/// Human-readable failure text for a non-2xx response: `HTTP <status>: <message>`.
///
/// The message is the `message` (or `error`) field of a JSON error body when
/// present, otherwise the raw body text, otherwise the status reason.
pub fn describe_failure(response: &HttpResponse) -> String {
    format!("HTTP {}: {}", response.status, failure_message(response))
}

/// The message part of [`describe_failure`].
pub fn failure_message(response: &HttpResponse) -> String {
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = fields.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }

    if !text.is_empty() {
        return text.to_string();
    }

    status_reason(response.status).to_string()
}

fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Request failed",
    }
}

impl HttpResponse {
    /// Decode the body with [`decode_body`] using this response's content type.
    pub fn decoded_body(&self) -> Result<Option<Value>, DecodeError> {
        decode_body(self.content_type(), &self.body)
    }
}
