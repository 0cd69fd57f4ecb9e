//! Reloadable handle on the active mapping table.
//!
//! # Design Decisions
//! - Readers take an `Arc` snapshot; nothing is locked on the request path
//! - A reload builds a brand-new table and swaps it in, the old one is never touched
//! - A failed reload keeps the current table

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::mapping::loader::{load_mapping_file, MappingError};
use crate::mapping::schema::MappingsFile;
use crate::observability::metrics;

/// Shared, swappable [`MappingsFile`] backed by a file on disk.
///
/// Only [`MappingStore::open`] builds one, so the active table has always
/// passed validation:
///
/// ```compile_fail
/// use https_redirect::{MappingStore, MappingsFile};
/// let _ = MappingStore::new("mapping.yaml", MappingsFile::default());
/// ```
#[derive(Debug)]
pub struct MappingStore {
    path: PathBuf,
    current: ArcSwap<MappingsFile>,
}

impl MappingStore {
    /// Load the file at `path` and wrap it in a store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MappingError> {
        let path = path.into();
        let file = load_mapping_file(&path)?;

        tracing::info!(
            path = %path.display(),
            hosts = file.len(),
            entries = file.entry_count(),
            "Mapping file loaded"
        );
        metrics::record_mapping_hosts(file.len());

        Ok(Self::new(path, file))
    }

    /// Wrap an already validated table.
    fn new(path: impl Into<PathBuf>, file: MappingsFile) -> Self {
        Self {
            path: path.into(),
            current: ArcSwap::from_pointee(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the active table.
    pub fn current(&self) -> Arc<MappingsFile> {
        self.current.load_full()
    }

    /// Re-read the file and swap it in. On error the active table is kept.
    pub fn reload(&self) -> Result<Arc<MappingsFile>, MappingError> {
        match load_mapping_file(&self.path) {
            Ok(file) => {
                let file = Arc::new(file);
                self.current.store(Arc::clone(&file));

                tracing::info!(
                    path = %self.path.display(),
                    hosts = file.len(),
                    entries = file.entry_count(),
                    "Mapping file reloaded"
                );
                metrics::record_reload(true);
                metrics::record_mapping_hosts(file.len());
                Ok(file)
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reload mapping file. Keeping current mappings."
                );
                metrics::record_reload(false);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reload_swaps_and_keeps_old_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        fs::write(&path, "mapping:\n  a:\n    \"/\": https://one\n").unwrap();

        let store = MappingStore::open(&path).unwrap();
        let before = store.current();
        assert_eq!(before.get_redirect_uri("a", "/x"), "https://one");

        fs::write(&path, "mapping:\n  a:\n    \"/\": https://two\n").unwrap();
        store.reload().unwrap();
        assert_eq!(store.current().get_redirect_uri("a", "/x"), "https://two");
        // Snapshots taken earlier are unaffected.
        assert_eq!(before.get_redirect_uri("a", "/x"), "https://one");

        fs::write(&path, "mapping:\n  localhost:\n    \"/\": https://three\n").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.current().get_redirect_uri("a", "/x"), "https://two");
    }
}
