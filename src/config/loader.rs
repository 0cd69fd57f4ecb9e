//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ConfigValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ConfigValidationError>),
}

fn join(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration held in memory.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read a TOML file without validating it, for callers that still apply
/// overrides (e.g. command-line flags) before calling [`validate_config`].
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.redirect_status, 302);
        assert_eq!(config.mapping_file, Path::new("mapping.yaml"));
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
mapping_file = "/etc/redirect/mapping.yaml"

[listener]
bind_address = "127.0.0.1:9000"
redirect_status = 308

[observability]
log_level = "debug"
metrics_enabled = true
metrics_address = "127.0.0.1:9100"
"#,
        )
        .unwrap();
        assert_eq!(config.listener.redirect_status, 308);
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[listener]\nbind_address = \"x\"\nredirect_status = 200\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "), "{msg}");
        assert!(msg.contains(", "), "{msg}");
    }

    #[test]
    fn test_read_config_skips_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, "[listener]\nredirect_status = 200\n").unwrap();

        assert_eq!(read_config(&path).unwrap().listener.redirect_status, 200);
        assert!(matches!(
            load_config(&path).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/service.toml")).unwrap_err(),
            ConfigError::Io(_)
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("[listener\n").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
