//! # Host Bridge Traits
//!
//! Platform abstraction traits that each host platform implements.
//!
//! ## Overview
//!
//! This crate defines the contract between the request layer and the
//! platform-specific adapters. Each trait is a capability the request layer
//! needs but that is provided differently per platform (native desktop,
//! browser tab, browser embedded in the desktop host).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Native networking used by the direct transport
//! - [`HostRouter`](host::HostRouter) - RPC channel into the privileged desktop host
//! - [`KeyValueStore`](storage::KeyValueStore) - String persistence for the bearer token
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Implementations
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//! | Web      | `bridge-wasm`       |
//!
//! ## Body Decoding
//!
//! [`decode`] holds the single content-negotiation rule every transport and
//! host router applies to response bodies.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! convert platform errors into it and keep the message actionable.
//!
//! ## Thread Safety
//!
//! Traits require `Send + Sync` on native targets through
//! [`PlatformSendSync`](platform::PlatformSendSync); the bound is dropped on
//! `wasm32` where browser handles are single-threaded.

pub mod decode;
pub mod error;
pub mod host;
pub mod http;
pub mod logging;
pub mod platform;
pub mod storage;

pub use decode::{
    decode_body, decode_failure_detail, describe_failure, DecodeError, DECODE_FAILURE_PREFIX,
};
pub use error::BridgeError;

pub use host::{HostRouter, ResponseEnvelope};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
