//! Process entry point: loads configuration, wires the external clients, and serves the
//! query service's HTTP surface.
use std::sync::Arc;
use std::time::Duration;

use common::config::{init_config, AppConfig};
use query_client::{HttpAnnBackend, OpenAiEmbeddingBackend, QueryClient, QueryClientConfig};
use query_service::{build_router, OpenAiSummaryBackend, QueryState, SearchCache};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match init_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration error at startup");
            std::process::exit(2);
        }
    };

    let app = build_app(config);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, port = config.http_port, "failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(port = config.http_port, "search-api listening");

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server terminated unexpectedly");
        std::process::exit(1);
    }
}

fn build_app(config: &'static AppConfig) -> axum::Router {
    let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(&config.openai_api_key);
    if let Some(base) = &config.openai_api_base {
        openai_config = openai_config.with_api_base(base);
    }
    let openai_client = async_openai::Client::with_config(openai_config);

    let embedding_backend = Arc::new(OpenAiEmbeddingBackend::new(
        openai_client.clone(),
        config.embedding_model.clone(),
        768,
    ));

    let ann_config = QueryClientConfig {
        project: config.project_id.clone(),
        location: config.location.clone(),
        endpoint_id: config.index_endpoint_id.clone(),
        deployed_index_id: config.deployed_index_id.clone(),
    };
    let ann_backend = Arc::new(HttpAnnBackend::new(reqwest::Client::new(), &ann_config));

    let query_client = Arc::new(QueryClient::new(embedding_backend, ann_backend));

    let summary_backend = Arc::new(OpenAiSummaryBackend::new(
        openai_client,
        config.summary_model.clone(),
    ));

    let cache = Arc::new(SearchCache::new(
        config.cache_max_entries,
        Duration::from_secs(config.cache_ttl_seconds),
    ));

    let state = QueryState {
        config: Arc::new(config.clone()),
        query_client,
        cache,
        summary_backend,
    };

    build_router(state)
}
