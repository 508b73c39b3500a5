#![allow(clippy::missing_docs_in_private_items)]
//! HTTP surface over the [`query_client::QueryClient`]: `/search` with an in-memory TTL+LRU
//! cache, `/summarize` streaming SSE, `/health`, `/config`.

pub mod cache;
pub mod error;
mod routes;
pub mod state;
pub mod summary_backend;

pub use cache::SearchCache;
pub use error::ApiError;
pub use state::QueryState;
pub use summary_backend::{OpenAiSummaryBackend, SummaryBackend, SummaryChunk};

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full router over `state`. Route grouping and `TraceLayer` placement follow the
/// teacher's `api-router` crate shape.
pub fn build_router(state: QueryState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/search", get(routes::search::search))
        .route("/summarize", post(routes::summarize::summarize))
        .route("/config", get(routes::config::config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary_backend::SummaryChunk;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use common::config::AppConfig;
    use futures::stream::{self, BoxStream};
    use query_client::{AnnBackend, EmbeddingBackend, Neighbor, QueryClient, QueryClientError};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            project_id: "proj".to_string(),
            location: "us-central1".to_string(),
            index_endpoint_id: "endpoint".to_string(),
            deployed_index_id: "deployed".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            summary_model: "gemini-1.5-flash".to_string(),
            cache_ttl_seconds: 300,
            cache_max_entries: 1000,
            default_top_k: 10,
            max_top_k: 100,
            request_timeout_seconds: 30,
            http_port: 8080,
            openai_api_key: String::new(),
            openai_api_base: None,
        })
    }

    struct StubEmbeddingBackend;

    #[async_trait]
    impl EmbeddingBackend for StubEmbeddingBackend {
        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, QueryClientError> {
            Ok(vec![0.0, 0.0])
        }
    }

    struct StubAnnBackend {
        neighbors: Vec<Neighbor>,
    }

    #[async_trait]
    impl AnnBackend for StubAnnBackend {
        async fn find_neighbors(
            &self,
            _embedding: &[f32],
            top_k: usize,
        ) -> Result<Vec<Neighbor>, QueryClientError> {
            Ok(self.neighbors.iter().take(top_k).cloned().collect())
        }
    }

    struct StubSummaryBackend {
        chunks: Vec<&'static str>,
    }

    #[async_trait]
    impl SummaryBackend for StubSummaryBackend {
        async fn stream_summary(
            &self,
            _content: &str,
            _max_tokens: u32,
        ) -> Result<BoxStream<'static, SummaryChunk>, String> {
            let items: Vec<SummaryChunk> = self.chunks.iter().map(|c| Ok(c.to_string())).collect();
            Ok(Box::pin(stream::iter(items)))
        }
    }

    fn test_state() -> QueryState {
        QueryState {
            config: test_config(),
            query_client: Arc::new(QueryClient::new(
                Arc::new(StubEmbeddingBackend),
                Arc::new(StubAnnBackend {
                    neighbors: vec![
                        Neighbor {
                            id: "c1".to_string(),
                            distance: 0.0,
                        },
                        Neighbor {
                            id: "c2".to_string(),
                            distance: 1.0,
                        },
                    ],
                }),
            )),
            cache: Arc::new(SearchCache::new(1000, Duration::from_secs(300))),
            summary_backend: Arc::new(StubSummaryBackend {
                chunks: vec!["Hello", " ", "world", "."],
            }),
        }
    }

    #[tokio::test]
    async fn scenario_s1_health_check() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "search-api");
    }

    #[tokio::test]
    async fn scenario_s2_cache_miss_then_hit() {
        let app = build_router(test_state());

        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/search?q=machine+learning&k=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let body = axum::body::to_bytes(first.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["cache_hit"], false);
        assert_eq!(json["results"][0]["chunk_id"], "c1");
        assert_eq!(json["results"][0]["score"], 1.0);
        assert_eq!(json["results"][1]["chunk_id"], "c2");
        assert_eq!(json["results"][1]["score"], 0.5);

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/search?q=machine+learning&k=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        let body = axum::body::to_bytes(second.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["cache_hit"], true);
    }

    #[tokio::test]
    async fn search_rejects_missing_query() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/search?k=2").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_rejects_k_above_max() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/search?q=hello&k=1000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scenario_s7_summarize_sse_frames() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"content":"some text","max_tokens":8}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/event-stream"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(
            text,
            "data: Hello\n\ndata:  \n\ndata: world\n\ndata: .\n\ndata: [DONE]\n\n"
        );
    }

    #[tokio::test]
    async fn summarize_rejects_missing_content_with_400() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"max_tokens":8}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn config_endpoint_returns_api_url() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["api_url"].as_str().unwrap().contains("8080"));
    }
}
