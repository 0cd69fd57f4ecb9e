//! Mapping file loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::mapping::schema::MappingsFile;
use crate::mapping::validation::ValidationError;

/// Error type for mapping file loading.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("mapping file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read mapping file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed mapping file: {0}")]
    Deserialize(#[from] serde_yaml::Error),

    #[error("invalid mapping file: {0}")]
    Validation(#[from] ValidationError),
}

impl MappingError {
    /// The validation failure, if this error is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            MappingError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Deserialize and validate a mapping file held in memory.
pub fn parse(bytes: &[u8]) -> Result<MappingsFile, MappingError> {
    // An empty document stands for an empty file.
    let file: Option<MappingsFile> = if bytes.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_yaml::from_slice(bytes)?
    };
    let file = file.unwrap_or_default();

    file.validate()?;

    tracing::debug!(
        hosts = file.len(),
        entries = file.entry_count(),
        "Mapping file parsed"
    );
    Ok(file)
}

/// Read, deserialize and validate the mapping file at `path`.
pub fn load_mapping_file(path: &Path) -> Result<MappingsFile, MappingError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => MappingError::NotFound(path.to_path_buf()),
        _ => MappingError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse(&bytes)
}

impl FromStr for MappingsFile {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_ROOT: &str = "---
mapping:
  testhost:
    \"/my-path\": https://localhost:8081
    \"/\": https://localhost:8082
";

    #[test]
    fn test_parse_with_root() {
        let file = parse(WITH_ROOT.as_bytes()).unwrap();
        assert_eq!(file.get_redirect_uri("testhost", "/my-path"), "https://localhost:8081");
        assert_eq!(file.get_redirect_uri("testhost", "/anything"), "https://localhost:8082");
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_numeric_host_names() {
        let file = parse(b"mapping:\n  8080:\n    \"/\": https://x\n  1.5:\n    \"/a\": https://y\n").unwrap();
        assert_eq!(file.get_redirect_uri("8080", "/anything"), "https://x");
        assert_eq!(file.get_redirect_uri("1.5", "/a"), "https://y");
    }

    #[test]
    fn test_parse_empty_document() {
        for doc in ["---\n", "", "mapping:\n", "mapping: {}\n", "other: 1\n"] {
            let err = parse(doc.as_bytes()).unwrap_err();
            assert_eq!(
                err.validation(),
                Some(&ValidationError::EmptyMappingsFile),
                "document {doc:?}"
            );
        }
    }

    #[test]
    fn test_parse_malformed() {
        for doc in ["mapping: [1, 2]\n", "mapping:\n  h: \"not a table\"\n", "mapping: {"] {
            let err = parse(doc.as_bytes()).unwrap_err();
            assert!(matches!(err, MappingError::Deserialize(_)), "document {doc:?} gave {err:?}");
        }
        assert!(matches!(
            parse(b"mapping: \xc3\x28\n").unwrap_err(),
            MappingError::Deserialize(_)
        ));
    }

    #[test]
    fn test_from_str() {
        let file: MappingsFile = WITH_ROOT.parse().unwrap();
        assert_eq!(file.len(), 1);
        assert!("mapping:\n  localhost:\n    \"/\": https://x\n"
            .parse::<MappingsFile>()
            .is_err());
    }
}
