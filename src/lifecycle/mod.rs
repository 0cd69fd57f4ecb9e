//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Load mappings → Bind → Serve
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Reload the mapping file
//!
//! Exit (exit.rs):
//!     Every failure maps to one documented exit code
//! ```

pub mod exit;
pub mod signals;

pub use exit::ExitCode;
pub use signals::{shutdown_signal, spawn_reload_on_hangup};
