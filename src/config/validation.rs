//! Service configuration validation.
//!
//! # Responsibilities
//! - Validate addresses and the redirect status code
//! - Validate the log level name
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ConfigValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// Status codes accepted for redirects.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Log level names accepted in the configuration file.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("listener.bind_address: port must not be 0")]
    ZeroPort,

    #[error(
        "listener.redirect_status: {0} is not a redirect status, expected one of {expected:?}",
        expected = REDIRECT_STATUSES
    )]
    InvalidRedirectStatus(u16),

    #[error("observability.log_level: unknown level {0:?}")]
    InvalidLogLevel(String),

    #[error("mapping_file must not be empty")]
    EmptyMappingFile,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if config.mapping_file.as_os_str().is_empty() {
        errors.push(ConfigValidationError::EmptyMappingFile);
    }

    match config.listener.bind_address.parse::<SocketAddr>() {
        Ok(addr) if addr.port() == 0 => errors.push(ConfigValidationError::ZeroPort),
        Ok(_) => {}
        Err(_) => errors.push(ConfigValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        }),
    }

    if !REDIRECT_STATUSES.contains(&config.listener.redirect_status) {
        errors.push(ConfigValidationError::InvalidRedirectStatus(
            config.listener.redirect_status,
        ));
    }

    if let Err(e) = validate_log_level(&config.observability.log_level) {
        errors.push(e);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ConfigValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a log level name, case-insensitively.
pub fn validate_log_level(level: &str) -> Result<(), ConfigValidationError> {
    if LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidLogLevel(level.to_string()))
    }
}
