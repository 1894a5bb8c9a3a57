//! # Authentication Module
//!
//! Session credential handling for the Hub client.
//!
//! The backend issues an opaque bearer token at login. This crate persists it
//! through the platform's [`KeyValueStore`](bridge_traits::KeyValueStore) so
//! the direct transport can attach it to every outgoing request. Expiry,
//! rotation and refresh belong to the backend.

pub mod error;
pub mod token_store;

pub use error::{AuthError, Result};
pub use token_store::{TokenStore, AUTH_TOKEN_KEY};
