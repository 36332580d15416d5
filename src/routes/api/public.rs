use axum::{Router, routing::get};

use crate::response::{ApiResult, JsonApiResponse};

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> ApiResult<serde_json::Value> {
    JsonApiResponse::ok(serde_json::json!({ "status": "ok" }))
}
