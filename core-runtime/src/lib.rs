//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the request layer:
//! - Logging and tracing setup
//! - Client configuration
//!
//! Every other core crate depends on this one for its configuration types and
//! logging conventions.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, ClientConfigBuilder, TransportKind};
pub use error::{Error, Result};
