use crate::{
    error::{ApiError, panic_message},
    metrics::record_prediction_error,
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use sentiment_model::PredictionError;
use sentiment_types::{PredictionResult, Value};

/// Pulls the review out of a raw request body.
///
/// The body is read regardless of its declared content type. Anything that is
/// not a JSON object with a non-null `review` counts as "no review".
fn parse_review(body: &[u8]) -> Result<String, ApiError> {
    let Ok(Value::Object(mut payload)) = serde_json::from_slice::<Value>(body) else {
        return Err(ApiError::bad_request("No review provided"));
    };

    match payload.remove("review") {
        None | Some(Value::Null) => Err(ApiError::bad_request("No review provided")),
        Some(Value::String(review)) => Ok(review),
        Some(_) => Err(ApiError::bad_request("Review must be a string")),
    }
}

#[tracing::instrument(name = "POST /predict", skip(state, body))]
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let review = parse_review(&body?)?;

    let predictor = state.predictor.clone();
    let outcome = tokio::task::spawn_blocking(move || predictor.predict(&review))
        .await
        .unwrap_or_else(|join_err| {
            let message = if join_err.is_panic() {
                panic_message(join_err.into_panic().as_ref())
            } else {
                "Prediction task was cancelled".to_string()
            };
            Err(PredictionError::Panicked(message))
        });

    match outcome {
        Ok(result) => {
            tracing::debug!(
                sentiment = %result.sentiment,
                confidence = result.confidence,
                strategy = state.predictor.strategy().as_str(),
                "Prediction served"
            );
            Ok(Json(result))
        }
        Err(err) => {
            record_prediction_error();
            Err(err.into())
        }
    }
}
