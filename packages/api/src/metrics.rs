//! Prometheus registry shared by the whole process.
//!
//! Metric names match the dashboards built for the service:
//! `request_count_total`, `request_latency_seconds`, `prediction_errors_total`
//! and `auth_failures_total`.

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, PoisonError};

pub const REQUEST_COUNT: &str = "request_count_total";
pub const REQUEST_LATENCY: &str = "request_latency_seconds";
pub const PREDICTION_ERRORS: &str = "prediction_errors_total";
pub const AUTH_FAILURES: &str = "auth_failures_total";

/// Content type of the text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

static PROMETHEUS_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Installs the global recorder on first call and returns its handle.
///
/// Later calls return the same handle, so several routers in one process
/// (tests, mostly) share a single registry.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let mut slot = PROMETHEUS_HANDLE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_LATENCY.to_string()), LATENCY_BUCKETS)?
        .install_recorder()?;

    metrics::describe_counter!(REQUEST_COUNT, "App Request Count");
    metrics::describe_histogram!(REQUEST_LATENCY, "Request latency");
    metrics::describe_counter!(PREDICTION_ERRORS, "Total prediction errors");
    metrics::describe_counter!(
        AUTH_FAILURES,
        "Requests rejected for missing/invalid auth token"
    );

    tracing::info!("Prometheus metrics initialized");

    *slot = Some(handle.clone());
    Ok(handle)
}

pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration_secs: f64) {
    metrics::counter!(REQUEST_COUNT,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "http_status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(duration_secs);
}

pub fn record_prediction_error() {
    metrics::counter!(PREDICTION_ERRORS).increment(1);
}

pub fn record_auth_failure() {
    metrics::counter!(AUTH_FAILURES).increment(1);
}
