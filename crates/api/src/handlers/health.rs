use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Does not touch the database.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
