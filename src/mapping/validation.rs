//! Mapping validation.
//!
//! # Responsibilities
//! - Per entry: path starts with `/`, target is an absolute `https` URI
//! - Per file: at least one host, no reserved host name
//! - Attach the host name to per-entry failures
//!
//! # Design Decisions
//! - Stops at the first failure: a bad file is rejected as a unit
//! - Checks run in name order so the reported failure is deterministic
//! - Validation is a pure function of the table

use thiserror::Error;
use url::Url;

use crate::mapping::schema::{Mapping, MappingsFile};

/// Host name that may never appear in a mapping file.
pub const RESERVED_HOST: &str = "localhost";

const REQUIRED_SCHEME: &str = "https";

/// Reasons a mapping table is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Path is empty or does not start with `/`.
    #[error("invalid path {path:?}: paths must start with '/'")]
    InvalidPath { path: String },

    /// Target is not an absolute `https` URI.
    #[error("invalid redirect for {path:?}: {target:?} {reason}")]
    InvalidRedirectScheme {
        path: String,
        target: String,
        reason: String,
    },

    /// Host name is reserved.
    #[error("host name {0:?} is reserved and cannot be mapped")]
    ReservedHostName(String),

    /// No hosts under `mapping`.
    #[error("mappings file declares no hosts")]
    EmptyMappingsFile,

    /// A per-entry failure within `host`.
    #[error("host {host:?}: {source}")]
    Host {
        host: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// The underlying entry-level error, with any host wrapping removed.
    pub fn root(&self) -> &ValidationError {
        match self {
            ValidationError::Host { source, .. } => source.root(),
            other => other,
        }
    }
}

impl Mapping {
    /// Check every entry of this host's table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.entries().try_for_each(|entry| {
            validate_path(entry.path)?;
            validate_target(entry.path, entry.target)
        })
    }
}

impl MappingsFile {
    /// Check file-level rules, then every host's table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyMappingsFile);
        }

        if self.host(RESERVED_HOST).is_some() {
            return Err(ValidationError::ReservedHostName(RESERVED_HOST.to_string()));
        }

        for (host, mapping) in self.hosts() {
            if mapping.is_empty() {
                tracing::warn!(host = %host, "Host declares no redirects");
            }
            mapping.validate().map_err(|e| ValidationError::Host {
                host: host.to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}

fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::InvalidPath {
            path: path.to_string(),
        })
    }
}

fn validate_target(path: &str, target: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidRedirectScheme {
        path: path.to_string(),
        target: target.to_string(),
        reason,
    };

    let url = Url::parse(target).map_err(|e| invalid(format!("is not an absolute URI ({e})")))?;
    if url.scheme() != REQUIRED_SCHEME {
        return Err(invalid(format!(
            "uses scheme {:?}, only {REQUIRED_SCHEME:?} is accepted",
            url.scheme()
        )));
    }

    Ok(())
}
