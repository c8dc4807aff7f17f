use crate::metrics::record_http_request;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Counts and times every request, whatever produced its response.
///
/// The endpoint label is the raw request path.
pub async fn instrumentation_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();
    record_http_request(&method, &path, status, duration);

    tracing::debug!(
        method = %method,
        path = %path,
        status,
        duration_ms = duration * 1000.0,
        "Request handled"
    );

    response
}
