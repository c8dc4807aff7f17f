use metrics_exporter_prometheus::PrometheusHandle;
use sentiment_model::Predictor;
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Process-wide, read-only request context.
pub struct State {
    pub predictor: Arc<dyn Predictor>,
    pub metrics: PrometheusHandle,
    api_token: Option<String>,
}

impl State {
    /// An empty token disables authentication, same as no token.
    pub fn new(
        predictor: Arc<dyn Predictor>,
        api_token: Option<String>,
        metrics: PrometheusHandle,
    ) -> Self {
        Self {
            predictor,
            metrics,
            api_token: api_token.filter(|token| !token.is_empty()),
        }
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }
}
