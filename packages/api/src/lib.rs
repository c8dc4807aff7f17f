use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use middleware::{auth::auth_middleware, instrumentation::instrumentation_middleware};
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod metrics;
pub mod middleware;
mod routes;
pub mod state;

pub use axum;

/// Builds the full service.
///
/// Layer order matters: instrumentation is outermost so it also observes
/// responses produced by the auth gate, the panic guard and the fallback.
pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::metrics))
        .route("/predict", post(routes::predict::predict))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(state.clone())
        .layer(DefaultBodyLimit::disable())
        .layer(from_fn_with_state(state, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(instrumentation_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(error::panic_response)),
        )
}
