use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod frontend;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, WebConfig};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let front_page: Router<Arc<AppState>> =
        frontend::routes(state.config.frontend_dir.as_deref());

    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .merge(front_page)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, app: Router) -> fc_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState, WebConfig};
    pub use fc_core::{AnalysisResult, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use fc_core::{
        Error, FallacyCatalog, FallacyEntry, NewsSearch, PageFetcher, Result, SearchHit,
        SearchQuery,
    };
    use fc_inference::models::EchoModel;
    use fc_news::{FallacyPipeline, PipelineConfig};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct StubSearch {
        hits: Vec<SearchHit>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl NewsSearch for StubSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchHit>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Search("Serper API error (403): key sk-leak".into()));
            }
            Ok(self.hits.clone())
        }
    }

    struct StubFetcher;

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok("Steel tariffs rose 25 percent, officials said now.".to_string())
        }
    }

    struct Setup {
        hits: Vec<SearchHit>,
        fail: bool,
        expose_errors: bool,
        frontend_dir: Option<std::path::PathBuf>,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                hits: vec![SearchHit::new("Tariffs expand", "https://news.example/t")],
                fail: false,
                expose_errors: false,
                frontend_dir: None,
            }
        }
    }

    fn setup_test_app(setup: Setup) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog = FallacyCatalog::from_entries(vec![FallacyEntry::new(
            "Straw Man",
            "Misrepresenting an argument.",
        )])
        .unwrap();
        let pipeline = FallacyPipeline::new(
            Arc::new(StubSearch {
                hits: setup.hits,
                fail: setup.fail,
                calls: calls.clone(),
            }),
            Arc::new(StubFetcher),
            Arc::new(EchoModel::new()),
            Arc::new(catalog),
            PipelineConfig::default(),
        );
        let state = AppState {
            pipeline: Arc::new(pipeline),
            config: WebConfig {
                expose_errors: setup.expose_errors,
                frontend_dir: setup.frontend_dir,
            },
        };
        (create_app(state), calls)
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_text(app: Router, uri: &str) -> (StatusCode, String, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_api_analyze_success() {
        let (app, _) = setup_test_app(Setup::default());
        let (status, json) = send(app, analyze_request(r#"{"topic": "tariffs"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["sources"], "Tariffs expand - https://news.example/t");
        assert!(json["summary"]
            .as_str()
            .unwrap()
            .contains("Article: Steel tariffs rose 25 percent, officials said now."));
        assert!(json["analysis"].as_str().unwrap().starts_with("You are an ethics professor"));
    }

    #[tokio::test]
    async fn test_api_analyze_empty_topic() {
        let (app, calls) = setup_test_app(Setup::default());
        let (status, json) = send(app, analyze_request(r#"{"topic": "   "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "Missing topic text."}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_analyze_missing_topic() {
        for body in [r#"{}"#, r#"{"subject": "x"}"#, r#"{"topic": 7}"#, "not json"] {
            let (app, calls) = setup_test_app(Setup::default());
            let (status, json) = send(app, analyze_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json["error"], "Missing 'topic' in request body.");
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_api_analyze_no_articles() {
        let (app, _) = setup_test_app(Setup {
            hits: vec![],
            ..Default::default()
        });
        let (status, json) = send(app, analyze_request(r#"{"topic": "inflation"}"#)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, serde_json::json!({"error": "No articles found."}));
    }

    #[tokio::test]
    async fn test_api_analyze_upstream_error_is_redacted() {
        let (app, _) = setup_test_app(Setup {
            fail: true,
            ..Default::default()
        });
        let (status, json) = send(app, analyze_request(r#"{"topic": "tariffs"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Analysis failed.");
    }

    #[tokio::test]
    async fn test_api_analyze_upstream_error_exposed() {
        let (app, _) = setup_test_app(Setup {
            fail: true,
            expose_errors: true,
            ..Default::default()
        });
        let (status, json) = send(app, analyze_request(r#"{"topic": "tariffs"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("Serper API error (403)"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = setup_test_app(Setup::default());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["fallacies"], 1);
    }

    #[tokio::test]
    async fn test_bundled_front_page() {
        let (app, _) = setup_test_app(Setup::default());
        let (status, content_type, body) = get_text(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains(r#"id="analyze-form""#));
        assert!(body.contains("/static/app.js"));

        let (status, content_type, body) = get_text(app, "/static/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("application/javascript"));
        assert!(body.contains("'/api/analyze'"));
    }

    #[tokio::test]
    async fn test_front_page_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<p>custom page</p>").unwrap();
        let (app, _) = setup_test_app(Setup {
            frontend_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });

        let (status, _, body) = get_text(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<p>custom page</p>");

        let (status, json) = send(app, analyze_request(r#"{"topic": "tariffs"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sources"], "Tariffs expand - https://news.example/t");
    }
}
