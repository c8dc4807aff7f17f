//! End-to-end tests driving the router in-process.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use sentiment_api::{
    construct_router,
    metrics::install_recorder,
    state::{AppState, State},
};
use sentiment_model::{Classifier, LexicalFallbackPredictor, ModelPredictor, Predictor};
use sentiment_types::{Result, Value, anyhow};
use std::sync::Arc;
use tower::ServiceExt;

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _texts: &[&str]) -> Result<Vec<String>> {
        Err(anyhow!("classifier exploded"))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn predict(&self, _texts: &[&str]) -> Result<Vec<String>> {
        panic!("weights corrupted")
    }

    fn describe(&self) -> String {
        "panicking".to_string()
    }
}

struct ProbaClassifier;

impl Classifier for ProbaClassifier {
    fn predict(&self, texts: &[&str]) -> Result<Vec<String>> {
        Ok(texts.iter().map(|_| "neg".to_string()).collect())
    }

    fn supports_proba(&self) -> bool {
        true
    }

    fn predict_proba(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|_| vec![0.73, 0.27]).collect())
    }

    fn describe(&self) -> String {
        "proba".to_string()
    }
}

fn router_with(predictor: Arc<dyn Predictor>, token: Option<&str>) -> Router {
    let metrics = install_recorder().unwrap();
    let state: AppState = Arc::new(State::new(
        predictor,
        token.map(|t| t.to_string()),
        metrics,
    ));
    construct_router(state)
}

fn fallback_router(token: Option<&str>) -> Router {
    router_with(Arc::new(LexicalFallbackPredictor::new()), token)
}

fn model_router(classifier: impl Classifier + 'static) -> Router {
    router_with(Arc::new(ModelPredictor::new(Arc::new(classifier))), None)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_predict(body: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn predict_review(review: &str) -> (String, f64) {
    let body = serde_json::json!({ "review": review }).to_string();
    let (status, json) = send_json(fallback_router(None), post_predict(&body, None)).await;
    assert_eq!(status, StatusCode::OK);
    (
        json["sentiment"].as_str().unwrap().to_string(),
        json["confidence"].as_f64().unwrap(),
    )
}

/// Finds the sample whose line mentions every fragment and returns its value.
fn sample_value(exposition: &str, name: &str, fragments: &[&str]) -> Option<f64> {
    exposition
        .lines()
        .filter(|line| line.starts_with(name) && !line.starts_with('#'))
        .find(|line| fragments.iter().all(|f| line.contains(f)))
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, json) = send_json(fallback_router(Some("s3cret")), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_home_is_public() {
    let response = fallback_router(Some("s3cret")).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/predict"));
}

#[tokio::test]
async fn test_metrics_is_public_and_prometheus_formatted() {
    let router = fallback_router(Some("s3cret"));
    let (status, _) = send(router.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let response = router.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain; version=0.0.4"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("request_count_total"));
    assert!(body.contains("request_latency_seconds_bucket"));
}

#[tokio::test]
async fn test_missing_review_is_bad_request() {
    for body in ["", "{}", "not json", "[]", r#"{"review": null}"#, r#"{"other": "x"}"#] {
        let (status, json) = send_json(fallback_router(None), post_predict(body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json, serde_json::json!({ "error": "No review provided" }));
    }
}

#[tokio::test]
async fn test_non_string_review_is_bad_request() {
    let (status, json) = send_json(fallback_router(None), post_predict(r#"{"review": 42}"#, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Review must be a string");
}

#[tokio::test]
async fn test_body_without_json_content_type_is_read() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(Body::from(r#"{"review": "This is a great movie!"}"#))
        .unwrap();
    let (status, json) = send_json(fallback_router(None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "positive");
}

#[tokio::test]
async fn test_fallback_predictions() {
    let (sentiment, confidence) = predict_review("This is a great movie!").await;
    assert_eq!(sentiment, "positive");
    assert!((confidence - 0.9).abs() < 1e-9);

    let (sentiment, confidence) = predict_review("Terrible experience. The item arrived broken.").await;
    assert_eq!(sentiment, "negative");
    assert!(confidence > 0.5 && confidence <= 1.0);

    let (sentiment, confidence) = predict_review("Questo film è fantastico").await;
    assert_eq!(sentiment, "positive");
    assert_eq!(confidence, 0.9);

    let (sentiment, confidence) = predict_review("The package arrived on Tuesday").await;
    assert_eq!(sentiment, "negative");
    assert_eq!(confidence, 0.6);

    let (sentiment, confidence) = predict_review("").await;
    assert_eq!(sentiment, "negative");
    assert_eq!(confidence, 0.6);
}

#[tokio::test]
async fn test_predict_requires_exact_token() {
    let body = r#"{"review": "Nice"}"#;
    let rejected = [
        None,
        Some("bearer s3cret"),
        Some("Bearer s3cret "),
        Some("Bearer wrong"),
        Some("s3cret"),
    ];
    for auth in rejected {
        let (status, json) = send_json(fallback_router(Some("s3cret")), post_predict(body, auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "auth: {auth:?}");
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
    }

    let (status, _) = send(
        fallback_router(Some("s3cret")),
        post_predict(body, Some("Bearer s3cret")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_runs_before_validation() {
    let (status, _) = send(fallback_router(Some("s3cret")), post_predict("{}", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_token_disables_auth() {
    for token in [None, Some("")] {
        let (status, _) = send(fallback_router(token), post_predict(r#"{"review": "ok"}"#, None)).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, json) = send_json(fallback_router(None), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({ "error": "Not found" }));

    let (status, _) = send(fallback_router(Some("s3cret")), get("/nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_classifier_failure_is_internal_error() {
    let router = model_router(FailingClassifier);
    let (status, json) = send_json(router.clone(), post_predict(r#"{"review": "x"}"#, None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "classifier exploded" }));

    let (_, metrics) = send(router, get("/metrics")).await;
    let errors = sample_value(&metrics, "prediction_errors_total", &[]).unwrap();
    assert!(errors >= 1.0);
}

#[tokio::test]
async fn test_classifier_panic_is_internal_error() {
    let (status, json) = send_json(
        model_router(PanickingClassifier),
        post_predict(r#"{"review": "x"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "weights corrupted");
}

#[tokio::test]
async fn test_model_confidence_is_top_probability() {
    let (status, json) = send_json(
        model_router(ProbaClassifier),
        post_predict(r#"{"review": "meh"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "negative");
    assert_eq!(json["confidence"], 0.73);
}

#[tokio::test]
async fn test_every_response_is_counted() {
    let router = fallback_router(None);
    let (status, _) = send(router.clone(), get("/instrumentation-probe")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, metrics) = send(router, get("/metrics")).await;
    let count = sample_value(
        &metrics,
        "request_count_total",
        &[
            r#"method="GET""#,
            r#"endpoint="/instrumentation-probe""#,
            r#"http_status="404""#,
        ],
    );
    assert_eq!(count, Some(1.0));
    assert!(metrics.contains(r#"request_latency_seconds_count{endpoint="/instrumentation-probe"} 1"#));
}

#[tokio::test]
async fn test_auth_failures_are_counted() {
    let router = fallback_router(Some("s3cret"));
    let (status, _) = send(router.clone(), get("/auth-probe")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, metrics) = send(router, get("/metrics")).await;
    let count = sample_value(
        &metrics,
        "request_count_total",
        &[r#"endpoint="/auth-probe""#, r#"http_status="401""#],
    );
    assert_eq!(count, Some(1.0));
    assert!(sample_value(&metrics, "auth_failures_total", &[]).unwrap() >= 1.0);
}

#[tokio::test]
async fn test_large_review_is_accepted() {
    let review = "good ".repeat(500_000);
    let body = serde_json::json!({ "review": review }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let (status, json) = send_json(fallback_router(None), post_predict(&body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "positive");
    assert!((json["confidence"].as_f64().unwrap() - 0.85).abs() < 1e-9);
}

#[tokio::test]
async fn test_wrong_method_is_json_error() {
    let (status, json) = send_json(fallback_router(None), get("/predict")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, serde_json::json!({ "error": "Method not allowed" }));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(fallback_router(None), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");
}
