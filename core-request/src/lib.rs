//! # Request Layer
//!
//! Uniform request API for the Hub client, independent of how the request
//! actually reaches the backend.
//!
//! ## Overview
//!
//! UI code calls [`RequestClient::request`] with a URL and optional
//! [`RequestOptions`]. The client forwards a [`RequestDescriptor`] to the
//! single [`Transport`] chosen at startup:
//!
//! - [`DirectTransport`] performs HTTP itself and attaches the bearer token
//!   from [`TokenStore`](core_auth::TokenStore)
//! - [`BridgedTransport`] hands `(url, method, body)` to a
//!   [`HostRouter`](bridge_traits::HostRouter) and unwraps its envelope
//!
//! Both transports decode bodies with the same rule
//! ([`bridge_traits::decode`]), so a caller sees the same value or the same
//! class of failure from either.

pub mod bridged;
pub mod client;
pub mod descriptor;
pub mod direct;
pub mod error;
pub mod transport;

pub use bridge_traits::decode;

pub use bridged::BridgedTransport;
pub use client::RequestClient;
pub use descriptor::{RequestDescriptor, RequestOptions};
pub use direct::DirectTransport;
pub use error::{RequestError, Result};
pub use transport::Transport;
