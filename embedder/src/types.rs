use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedderError {
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    App(#[from] common::AppError),
}

/// A fixed-dimension embedding for one [`chunker::TextChunk`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    pub chunk_id: String,
    pub embedding: Vec<f32>,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

impl Vector {
    /// Construct a [`Vector`], rejecting embeddings whose length is not exactly `dimension`.
    pub fn new(
        chunk_id: String,
        embedding: Vec<f32>,
        model: String,
        dimension: usize,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, EmbedderError> {
        if embedding.len() != dimension {
            return Err(EmbedderError::DimensionMismatch {
                expected: dimension,
                actual: embedding.len(),
            });
        }
        Ok(Self {
            chunk_id,
            embedding,
            model,
            timestamp,
        })
    }
}

/// Batching and retry configuration for [`crate::embed`].
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    pub batch_size: usize,
    pub max_retries: u32,
    pub embedding_dimension: usize,
    pub model_name: String,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_retries: 3,
            embedding_dimension: 768,
            model_name: "text-embedding-004".to_string(),
        }
    }
}
