use bridge_traits::DecodeError;
use core_auth::AuthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    /// The network round-trip (or the host RPC call) did not complete.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The host router reported a failure in its envelope.
    #[error("{0}")]
    Host(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl RequestError {
    /// Whether the request failed in flight, regardless of transport.
    ///
    /// A direct `Status` failure and a bridged `Host` failure for the same
    /// backend response both report `true`.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            RequestError::Transport(_) | RequestError::Status { .. } | RequestError::Host(_)
        )
    }

    /// HTTP status, when the backend's status code is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DecodeError> for RequestError {
    fn from(err: DecodeError) -> Self {
        RequestError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;
