use async_trait::async_trait;
use common::embedding::generate_embedding;

use crate::types::QueryClientError;

/// Produces a single query embedding. A trait so tests can stand in a deterministic stub for
/// the managed embedding model, the same shape as the ANN lookup is stubbed.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, QueryClientError>;
}

/// Calls the real managed embedding model over the `async_openai`-compatible wire protocol.
pub struct OpenAiEmbeddingBackend {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimension: usize,
}

impl OpenAiEmbeddingBackend {
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        model: String,
        dimension: usize,
    ) -> Self {
        Self {
            client,
            model,
            dimension,
        }
    }
}

#[async_trait]
impl EmbeddingBackend for OpenAiEmbeddingBackend {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, QueryClientError> {
        generate_embedding(
            &self.client,
            &self.model,
            u32::try_from(self.dimension).unwrap_or(u32::MAX),
            text,
        )
        .await
        .map_err(|err| QueryClientError::Embedding(err.to_string()))
    }
}
