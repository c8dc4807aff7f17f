use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Small form for trying the service from a browser.
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}
