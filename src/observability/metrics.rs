//! Metrics collection and exposition.
//!
//! # Metrics
//! - `elb_requests_total` (counter): requests by action and result code
//! - `elb_request_duration_seconds` (histogram): dispatch latency by action
//! - `elb_model_instances` / `elb_model_load_balancers` (gauges): model size,
//!   updated by the admin status endpoint
//!
//! # Design Decisions
//! - Callers record unknown actions under `action="unknown"` to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched action.
pub fn record_action(action: &str, code: &'static str, start: Instant) {
    let action = action.to_string();
    metrics::counter!("elb_requests_total", "action" => action.clone(), "code" => code).increment(1);
    metrics::histogram!("elb_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current model size.
pub fn record_model_size(instances: usize, load_balancers: usize) {
    metrics::gauge!("elb_model_instances").set(instances as f64);
    metrics::gauge!("elb_model_load_balancers").set(load_balancers as f64);
}
