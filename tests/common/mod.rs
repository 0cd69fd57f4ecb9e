//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use https_redirect::http::{build_router, AppState};
use https_redirect::MappingStore;
use tempfile::TempDir;

pub const TESTHOST_WITH_ROOT: &str = "---
mapping:
  testhost:
    \"/my-path\": https://localhost:8081
    \"/\": https://localhost:8082
  other.example:
    \"/docs\": https://docs.example.com/start
";

/// A mapping file in its own temporary directory.
pub struct MappingFixture {
    #[allow(dead_code)]
    pub dir: TempDir,
    pub path: PathBuf,
}

impl MappingFixture {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        fs::write(&path, contents).unwrap();
        Self { dir, path }
    }

    #[allow(dead_code)]
    pub fn rewrite(&self, contents: &str) {
        fs::write(&self.path, contents).unwrap();
    }

    #[allow(dead_code)]
    pub fn store(&self) -> Arc<MappingStore> {
        Arc::new(MappingStore::open(&self.path).unwrap())
    }
}

/// Router over `store` answering with `status`.
#[allow(dead_code)]
pub fn router(store: Arc<MappingStore>, status: StatusCode) -> Router {
    build_router(AppState {
        mappings: store,
        redirect_status: status,
    })
}
