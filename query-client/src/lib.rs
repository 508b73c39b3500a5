#![allow(clippy::missing_docs_in_private_items)]
//! Executes a single vector similarity lookup against the external ANN index and returns ranked
//! matches with a similarity score.

mod ann_backend;
mod embedding_backend;
mod scoring;
mod types;

pub use ann_backend::{AnnBackend, HttpAnnBackend};
pub use embedding_backend::{EmbeddingBackend, OpenAiEmbeddingBackend};
pub use scoring::distance_to_similarity;
pub use types::{Neighbor, QueryClientConfig, QueryClientError, SearchMatch};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Map;

/// A single vector-search lookup against the managed ANN index, plus the embedding call it
/// takes to get there. Shared across concurrent request handlers: both backends are `Arc`-held
/// and the latency gauge is lock-free, so `query` never blocks unrelated callers.
pub struct QueryClient {
    embedding_backend: Arc<dyn EmbeddingBackend>,
    ann_backend: Arc<dyn AnnBackend>,
    last_query_latency_ms: AtomicU64,
}

impl QueryClient {
    pub fn new(embedding_backend: Arc<dyn EmbeddingBackend>, ann_backend: Arc<dyn AnnBackend>) -> Self {
        Self {
            embedding_backend,
            ann_backend,
            last_query_latency_ms: AtomicU64::new(0),
        }
    }

    /// Embed `text`, look up `top_k` neighbors, and return them as descending-score
    /// [`SearchMatch`]es. Ties break by insertion (ANN response) order, via a stable sort.
    ///
    /// # Errors
    /// Propagates whatever the embedding or ANN backend returns; an empty neighbor set is not
    /// an error.
    pub async fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchMatch>, QueryClientError> {
        let start = Instant::now();

        let embedding = self.embedding_backend.embed_query(text).await?;
        let neighbors = self.ann_backend.find_neighbors(&embedding, top_k).await?;

        let mut matches: Vec<SearchMatch> = neighbors
            .into_iter()
            .map(|neighbor| SearchMatch {
                chunk_id: neighbor.id,
                score: distance_to_similarity(neighbor.distance),
                content: String::new(),
                metadata: Map::new(),
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_query_latency_ms.store(elapsed_ms, Ordering::Relaxed);

        Ok(matches)
    }

    /// Wall-clock duration of the most recent [`Self::query`] call, in milliseconds.
    pub fn last_query_latency_ms(&self) -> f64 {
        self.last_query_latency_ms.load(Ordering::Relaxed) as f64
    }
}
