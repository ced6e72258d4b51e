use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use fc_core::AnalysisResult;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, MISSING_TOPIC_FIELD};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let topic = match payload {
        Ok(Json(AnalyzeRequest { topic: Some(topic) })) => topic,
        Ok(_) => return Err(ApiError::bad_request(MISSING_TOPIC_FIELD)),
        Err(rejection) => {
            debug!(error = %rejection, "Rejected analyze request body");
            return Err(ApiError::bad_request(MISSING_TOPIC_FIELD));
        }
    };

    state
        .pipeline
        .run(&topic)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_pipeline(err, state.config.expose_errors))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "fallacies": state.pipeline.catalog().len(),
    }))
}
