//! Liveness/readiness probe. Always 200, no I/O. Required configuration is guaranteed
//! non-empty by construction because startup fails fast when it is missing.
use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "search-api"}))
}
