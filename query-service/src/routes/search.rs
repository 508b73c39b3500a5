//! `GET /search`: validate -> cache lookup -> (query client call) -> cache store -> respond.
//! Never holds the cache lock across the query client call.
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Query, State};
use axum::Json;
use common::config::AppConfig;
use query_client::{QueryClient, SearchMatch};
use serde::{Deserialize, Serialize};

use crate::cache::SearchCache;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    results: Vec<SearchMatch>,
    latency_ms: f64,
    cache_hit: bool,
}

pub async fn search(
    State(config): State<Arc<AppConfig>>,
    State(query_client): State<Arc<QueryClient>>,
    State(cache): State<Arc<SearchCache>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    let q = params
        .q
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::validation("q is required and must be non-empty"))?;

    let k = params.k.unwrap_or(config.default_top_k);
    if k == 0 || k > config.max_top_k {
        return Err(ApiError::validation(format!(
            "k must be between 1 and {}",
            config.max_top_k
        )));
    }

    let key = SearchCache::key_for(&q, k);

    if let Some(results) = cache.get(&key) {
        return Ok(Json(SearchResponse {
            results,
            latency_ms: elapsed_ms(start),
            cache_hit: true,
        }));
    }

    let timeout = Duration::from_secs(config.request_timeout_seconds);
    let results = match tokio::time::timeout(timeout, query_client.query(&q, k)).await {
        Ok(Ok(results)) => results,
        Ok(Err(err)) => return Err(err.into()),
        Err(_) => return Err(ApiError::timeout("query client call exceeded the request timeout")),
    };

    cache.put(key, results.clone());

    Ok(Json(SearchResponse {
        results,
        latency_ms: elapsed_ms(start),
        cache_hit: false,
    }))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
