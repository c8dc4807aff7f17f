#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use sentiment_api::{construct_router, metrics::install_recorder, state::State};
use sentiment_model::{ModelSource, select_predictor};
use std::sync::Arc;

mod config;
mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let telemetry = telemetry::Telemetry::init();

    tracing::info!("Starting review sentiment service");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: port={}, model_path={}, auth={}",
        config.port,
        config.model_path.display(),
        if config.api_token.is_some() { "enabled" } else { "disabled" }
    );

    let metrics = install_recorder()?;

    let source = ModelSource::new(config.model_path.clone(), config.model_url.clone());
    let predictor = select_predictor(&source).await;

    let state = Arc::new(State::new(predictor, config.api_token.clone(), metrics));
    let app = construct_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
