use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fc_core::ErrorKind;
use serde_json::json;
use tracing::error;

pub const MISSING_TOPIC_FIELD: &str = "Missing 'topic' in request body.";
pub const REDACTED_MESSAGE: &str = "Analysis failed.";

/// An error on its way to the client as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Maps a pipeline error. Upstream and internal messages are replaced
    /// with a generic one unless `expose` is set.
    pub fn from_pipeline(err: fc_core::Error, expose: bool) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadOutput => StatusCode::BAD_GATEWAY,
            ErrorKind::Upstream | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match kind {
            ErrorKind::Validation | ErrorKind::NotFound => err.to_string(),
            _ => {
                error!(error = %err, ?kind, "An error occurred during analysis");
                if expose {
                    err.to_string()
                } else {
                    REDACTED_MESSAGE.to_string()
                }
            }
        };

        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
