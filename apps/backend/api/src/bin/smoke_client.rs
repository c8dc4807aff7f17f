//! Exercises a running instance: health first, then one positive and one
//! negative review.
//!
//! `BASE_URL` defaults to `http://localhost:5000`; `API_TOKEN` is sent as a
//! bearer token when set.

use reqwest::{Client, RequestBuilder};
use sentiment_types::{PredictionRequest, Value};
use std::env;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const SAMPLE_REVIEWS: [&str; 2] = [
    "This product is amazing, I love it!",
    "Terrible experience. The item arrived broken.",
];

fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/');
    let token = env::var("API_TOKEN").ok().filter(|t| !t.is_empty());
    let client = Client::new();

    let response = client.get(format!("{}/health", base_url)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    tracing::info!(%status, %body, "GET /health");
    if !status.is_success() {
        return Err(format!("health check failed with {}", status).into());
    }

    for review in SAMPLE_REVIEWS {
        let payload = PredictionRequest {
            review: review.to_string(),
        };
        let request = client.post(format!("{}/predict", base_url)).json(&payload);
        let response = authorized(request, token.as_deref()).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        tracing::info!(review, %status, %body, "POST /predict");
        if !status.is_success() {
            return Err(format!("prediction failed with {}", status).into());
        }
    }

    Ok(())
}
