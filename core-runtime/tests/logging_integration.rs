//! Integration tests for logging and configuration

use bridge_traits::{ConsoleLogger, LogLevel};
use core_runtime::config::{ClientConfig, TransportKind};
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};
use std::sync::Arc;

#[test]
fn test_logging_initialization_is_once_per_process() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(Arc::new(ConsoleLogger::default()));

    init_logging(config.clone()).expect("first initialization succeeds");
    tracing::info!(target: "core_request", "logging ready");

    // The global subscriber is already set.
    assert!(init_logging(config).is_err());
}

#[test]
fn test_redaction_of_credentials() {
    assert_eq!(redact_if_sensitive("token", "eyJhbGciOi"), "[REDACTED]");
    assert_eq!(
        redact_if_sensitive("authorization", "Bearer eyJhbGciOi"),
        "[REDACTED]"
    );
    assert_eq!(redact_if_sensitive("method", "GET"), "GET");
}

#[test]
fn test_config_carries_logging_settings() {
    let config = ClientConfig::builder()
        .base_url("http://127.0.0.1:8080")
        .transport(TransportKind::Direct)
        .logging(LoggingConfig::default().with_format(LogFormat::Json))
        .build()
        .unwrap();

    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(format!("{:?}", config).contains("ClientConfig"));
}
