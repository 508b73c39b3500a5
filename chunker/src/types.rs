use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkerError {
    #[error("invalid chunker input: {0}")]
    InvalidInput(String),
}

/// Bounded-window chunking configuration.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 450,
            overlap: 80,
        }
    }
}

impl ChunkerConfig {
    pub fn validate(&self) -> Result<(), ChunkerError> {
        if self.chunk_size == 0 {
            return Err(ChunkerError::InvalidInput(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkerError::InvalidInput(
                "overlap must be strictly less than chunk_size".to_string(),
            ));
        }
        Ok(())
    }
}

/// An ordered, bounded-length span of a document's text, ready for embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub chunk_id: String,
    pub content: String,
    pub token_count: usize,
    pub source_file: String,
    pub metadata: Map<String, Value>,
}

impl TextChunk {
    pub fn new(
        chunk_id: String,
        content: String,
        token_count: usize,
        source_file: String,
        metadata: Map<String, Value>,
    ) -> Result<Self, ChunkerError> {
        if chunk_id.trim().is_empty() {
            return Err(ChunkerError::InvalidInput(
                "chunk_id must not be empty".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(ChunkerError::InvalidInput(
                "content must not be empty".to_string(),
            ));
        }
        if token_count == 0 {
            return Err(ChunkerError::InvalidInput(
                "token_count must be positive".to_string(),
            ));
        }
        Ok(Self {
            chunk_id,
            content,
            token_count,
            source_file,
            metadata,
        })
    }
}
