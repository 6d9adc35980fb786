//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hero_routes_requests_total` (counter): requests by method, route, status
//! - `hero_routes_request_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Labels use the route template, never the raw path, to bound cardinality
//! - Recording is a no-op until an exporter is installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("hero_routes_requests_total", &labels).increment(1);
    metrics::histogram!("hero_routes_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
