use std::path::Path;

use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

pub const INDEX_HTML: &str = include_str!("../assets/index.html");
pub const APP_JS: &str = include_str!("../assets/app.js");

/// Browser front page. `dir` replaces the bundled page and script when set.
pub fn routes<S>(dir: Option<&Path>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match dir {
        Some(dir) => Router::new()
            .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => Router::new()
            .route("/", get(index))
            .route("/static/app.js", get(app_js)),
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}
