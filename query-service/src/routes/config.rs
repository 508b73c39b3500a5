//! Static configuration the optional co-deployed demo UI reads on load.
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use common::config::AppConfig;
use serde_json::{json, Value};

pub async fn config(State(config): State<Arc<AppConfig>>) -> Json<Value> {
    Json(json!({ "api_url": format!("http://localhost:{}", config.http_port) }))
}
