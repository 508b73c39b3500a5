#![allow(clippy::missing_docs_in_private_items)]
//! Turns a list of [`chunker::TextChunk`]s into a list of [`Vector`]s via the external embedding
//! model, with batching and bounded exponential-backoff retry.

mod types;

pub use types::{EmbedderConfig, EmbedderError, Vector};

use chrono::Utc;
use chunker::TextChunk;
use common::embedding::generate_embeddings;
use tracing::warn;

/// Embed every chunk in `chunks`, preserving order. Batches of at most `config.batch_size`
/// chunks are sent to the embedding model sequentially; each batch retries on transient failure
/// with `2^k` second backoff, up to `config.max_retries` attempts, and fails the whole batch
/// atomically once retries are exhausted.
///
/// # Errors
/// Returns [`EmbedderError`] if any batch exhausts its retries or returns a
/// wrongly-dimensioned embedding.
pub async fn embed(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    chunks: &[TextChunk],
    config: &EmbedderConfig,
) -> Result<Vec<Vector>, EmbedderError> {
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let mut vectors = Vec::with_capacity(chunks.len());

    for batch in chunks.chunks(config.batch_size.max(1)) {
        let texts: Vec<String> = batch.iter().map(|chunk| chunk.content.clone()).collect();
        let embeddings = embed_batch_with_retry(client, &texts, config).await?;

        for (chunk, embedding) in batch.iter().zip(embeddings) {
            vectors.push(Vector::new(
                chunk.chunk_id.clone(),
                embedding,
                config.model_name.clone(),
                config.embedding_dimension,
                Utc::now(),
            )?);
        }
    }

    Ok(vectors)
}

async fn embed_batch_with_retry(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    texts: &[String],
    config: &EmbedderConfig,
) -> Result<Vec<Vec<f32>>, EmbedderError> {
    let mut attempt = 0u32;
    loop {
        match generate_embeddings(
            client,
            &config.model_name,
            u32::try_from(config.embedding_dimension).unwrap_or(u32::MAX),
            texts,
        )
        .await
        {
            Ok(embeddings) => return Ok(embeddings),
            Err(err) if attempt < config.max_retries => {
                let backoff = std::time::Duration::from_secs(2u64.saturating_pow(attempt));
                warn!(
                    attempt,
                    max_retries = config.max_retries,
                    backoff_secs = backoff.as_secs(),
                    error = %err,
                    "embedding call failed, retrying after backoff"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}
