//! Service configuration schema.
//!
//! Every field has a default so that an absent or minimal file still
//! yields a runnable service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration of the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Path of the YAML mapping file.
    pub mapping_file: PathBuf,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mapping_file: PathBuf::from("mapping.yaml"),
            listener: ListenerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Status code sent with redirects.
    pub redirect_status: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            redirect_status: 302,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
