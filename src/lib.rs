//! Host/path redirect service library.
//!
//! [`mapping`] holds the redirect table: its model, validation and lookup.
//! The other modules are the thin service around it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use mapping::{load_mapping_file, parse, MappingError, MappingStore, MappingsFile};
