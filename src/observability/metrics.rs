//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method and status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_access_denied_total` (counter): rejections by reason
//!   (`external_ip`, `api_key`)
//!
//! Recording is a no-op until a recorder is installed by [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    counter!("api_requests_total", "method" => method.clone(), "status" => status.clone())
        .increment(1);
    histogram!("api_request_duration_seconds", "method" => method, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_access_denied(reason: &'static str) {
    counter!("api_access_denied_total", "reason" => reason).increment(1);
}

/// Middleware recording count and latency for every request.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
