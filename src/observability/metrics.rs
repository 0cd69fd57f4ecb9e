//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): requests by outcome (`redirect`, `not_found`)
//! - `redirect_request_duration_seconds` (histogram): handler latency
//! - `redirect_mapping_reloads_total` (counter): reloads by result (`ok`, `error`)
//! - `redirect_mapping_hosts` (gauge): number of hosts in the active table
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(outcome: &'static str, start: Instant) {
    ::metrics::counter!("redirect_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("redirect_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_reload(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    ::metrics::counter!("redirect_mapping_reloads_total", "result" => result).increment(1);
}

pub fn record_mapping_hosts(hosts: usize) {
    ::metrics::gauge!("redirect_mapping_hosts").set(hosts as f64);
}
