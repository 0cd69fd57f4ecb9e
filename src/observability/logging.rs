//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to the HTTP trace layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a log level name.
pub fn default_directive(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("https_redirect={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
