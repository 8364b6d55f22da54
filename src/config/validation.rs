//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, debounce period)
//! - Check addresses parse before anything binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MockConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must not be 0")]
    ZeroPort,

    #[error("api_path must not be empty")]
    EmptyApiPath,

    #[error("watcher.debounce_ms must be greater than 0")]
    ZeroDebounce,

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.api_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyApiPath);
    }

    if config.watcher.debounce_ms == 0 {
        errors.push(ValidationError::ZeroDebounce);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
