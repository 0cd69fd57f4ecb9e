//! OS signal handling.
//!
//! # Responsibilities
//! - Ctrl+C / SIGTERM → graceful shutdown
//! - SIGHUP → reload the mapping file
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a reload, not a shutdown
//! - A failed reload is logged and the service keeps running

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::mapping::MappingStore;

/// Wait for Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

/// Reload `store` every time the process receives SIGHUP.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(store: Arc<MappingStore>) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!(path = %store.path().display(), "SIGHUP received, reloading mappings");
            // Errors are logged by the store; the current table stays active.
            let _ = store.reload();
        }
    }))
}

/// SIGHUP does not exist here; the task only keeps the store alive.
#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(store: Arc<MappingStore>) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        let _store = store;
        std::future::pending::<()>().await;
    }))
}
