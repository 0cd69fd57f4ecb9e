//! HTTP server setup and the redirect handler.
//!
//! # Responsibilities
//! - Create the Axum router with a single fallback handler
//! - Wire up the trace layer
//! - Resolve `(host, path)` against the current mapping snapshot
//! - Answer with a redirect or a 404

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::mapping::MappingStore;
use crate::observability::metrics;

/// Body sent when no redirect matches.
pub const NOT_FOUND_BODY: &str = "no redirect configured";

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub mappings: Arc<MappingStore>,
    pub redirect_status: StatusCode,
}

/// HTTP front end serving redirects from a [`MappingStore`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(mappings: Arc<MappingStore>, redirect_status: StatusCode) -> Self {
        let state = AppState {
            mappings,
            redirect_status,
        };
        Self {
            router: build_router(state),
        }
    }

    /// The router, for embedding or for driving it directly.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(redirect_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let path = request.uri().path();
    let host = request_host(&request);

    let mappings = state.mappings.current();
    let target = host.and_then(|host| mappings.lookup(host, path));

    let Some(target) = target else {
        tracing::debug!(host = ?host, path = %path, "No redirect configured");
        metrics::record_request("not_found", start);
        return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
    };

    match HeaderValue::from_str(target) {
        Ok(location) => {
            tracing::debug!(host = ?host, path = %path, location = %target, "Redirecting");
            metrics::record_request("redirect", start);
            (state.redirect_status, [(header::LOCATION, location)]).into_response()
        }
        Err(e) => {
            tracing::error!(location = %target, error = %e, "Redirect target is not a valid header value");
            metrics::record_request("error", start);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Host the request was sent to, without a port.
fn request_host<B>(request: &Request<B>) -> Option<&str> {
    let raw = match request.headers().get(header::HOST) {
        Some(value) => value.to_str().ok()?,
        None => request.uri().authority()?.as_str(),
    };
    Some(strip_port(raw))
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [v6]:port
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
