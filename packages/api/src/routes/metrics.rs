use crate::{metrics::PROMETHEUS_CONTENT_TYPE, state::AppState};
use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], state.metrics.render())
}
