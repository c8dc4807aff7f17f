use crate::{error::ApiError, metrics::record_auth_failure, state::AppState};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Paths reachable without a token even when one is configured.
pub const EXEMPT_PATHS: [&str; 3] = ["/health", "/metrics", "/"];

/// Decides whether a request may proceed.
///
/// The header has to equal `Bearer <token>` byte for byte. No trimming, no
/// case folding of the scheme.
pub fn authorize(path: &str, headers: &HeaderMap, token: Option<&str>) -> bool {
    let Some(token) = token else {
        return true;
    };
    if EXEMPT_PATHS.contains(&path) {
        return true;
    }

    let Some(header) = headers.get(AUTHORIZATION) else {
        return false;
    };
    let expected = format!("Bearer {}", token);
    header.as_bytes() == expected.as_bytes()
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if authorize(request.uri().path(), request.headers(), state.api_token()) {
        return next.run(request).await;
    }

    record_auth_failure();
    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejected request with missing or invalid token"
    );
    ApiError::unauthorized("Unauthorized").into_response()
}
