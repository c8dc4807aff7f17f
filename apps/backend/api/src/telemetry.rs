//! Process-wide tracing setup.
//!
//! Logs always go to stdout through the fmt layer. Spans are additionally
//! exported over OTLP when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "sentiment-api";
const DEFAULT_FILTER: &str = "info";

/// Keeps the span exporter alive until [`Telemetry::shutdown`].
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    pub fn init() -> Self {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.is_empty());
        let exporter = endpoint.as_deref().map(otlp_provider);

        let provider = match &exporter {
            Some(Ok(provider)) => Some(provider.clone()),
            _ => None,
        };
        let otel_layer = provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(otel_layer)
            .init();

        match (endpoint, exporter) {
            (Some(endpoint), Some(Ok(_))) => tracing::info!(%endpoint, "Exporting spans over OTLP"),
            (Some(endpoint), Some(Err(e))) => {
                tracing::warn!(%endpoint, error = %e, "Failed to build OTLP exporter");
            }
            _ => tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, spans stay local"),
        }

        Self { provider }
    }

    /// Flushes pending spans.
    pub fn shutdown(self) {
        let Some(provider) = self.provider else {
            return;
        };
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Failed to flush spans on shutdown");
        }
    }
}

fn otlp_provider(endpoint: &str) -> Result<TracerProvider, opentelemetry::trace::TraceError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .build())
}
