//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace layer)
//!     → redirect handler: Host header + path
//!     → MappingStore snapshot lookup
//!     → 3xx with Location, or 404
//! ```

pub mod server;

pub use server::{build_router, AppState, HttpServer, NOT_FOUND_BODY};
