use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness probe. Always answers, regardless of model service availability.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Analyzer API is running!"
    }))
}
