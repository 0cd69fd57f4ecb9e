//! Redirect mapping subsystem.
//!
//! # Data Flow
//! ```text
//! mapping file (YAML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (per-entry, per-host, per-file checks)
//!     → MappingsFile (validated, immutable)
//!     → lookup per request: exact path, then "/" wildcard root
//!
//! On reload:
//!     store.rs loads a new MappingsFile
//!     → atomic swap of Arc<MappingsFile>
//!     → readers pick up the new table on their next snapshot
//! ```
//!
//! # Design Decisions
//! - A table is immutable once loaded; changes require a full reload
//! - The whole file is rejected on the first failure, nothing is partially loaded
//! - `/` is the only wildcard; there is no prefix or longest-match lookup

pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;

pub use loader::{load_mapping_file, parse, MappingError};
pub use schema::{Mapping, MappingEntry, MappingsFile, WILDCARD_ROOT};
pub use store::MappingStore;
pub use validation::{ValidationError, RESERVED_HOST};
