#![allow(clippy::missing_docs_in_private_items)]
//! Serializes [`embedder::Vector`]s to the newline-delimited JSON format the external ANN
//! index builder ingests. Pure serialization: no API calls, deterministic byte output for a
//! given input ordering.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chunker::TextChunk;
use embedder::Vector;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexPrepError {
    #[error("io error writing index file: {0}")]
    Io(#[from] std::io::Error),
    #[error("schema error: vector for chunk {chunk_id} has dimension {actual}, expected {expected}")]
    Schema {
        chunk_id: String,
        expected: usize,
        actual: usize,
    },
    #[error("malformed index record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A namespace-scoped allow list used for filtered search on the managed ANN index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restrict {
    pub namespace: String,
    pub allow_list: Vec<String>,
}

/// The on-disk form of a [`Vector`], one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub restricts: Vec<Restrict>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl IndexRecord {
    pub fn from_vector(vector: &Vector, dimension: usize, metadata: Map<String, Value>) -> Result<Self, IndexPrepError> {
        if vector.embedding.len() != dimension {
            return Err(IndexPrepError::Schema {
                chunk_id: vector.chunk_id.clone(),
                expected: dimension,
                actual: vector.embedding.len(),
            });
        }
        Ok(Self {
            id: vector.chunk_id.clone(),
            embedding: vector.embedding.clone(),
            restricts: Vec::new(),
            metadata,
        })
    }
}

/// Serialize `vectors` (optionally enriched with `chunks` metadata) to
/// `{output_dir}/{filename}` as UTF-8, LF-terminated JSONL with no trailing blank line.
///
/// # Errors
/// Returns [`IndexPrepError::Schema`] if any vector's embedding length is not `dimension`, or
/// [`IndexPrepError::Io`] on disk failure.
pub fn write_index(
    vectors: &[Vector],
    chunks: Option<&[TextChunk]>,
    output_dir: &Path,
    filename: &str,
    dimension: usize,
) -> Result<PathBuf, IndexPrepError> {
    let metadata_by_id: HashMap<&str, &Map<String, Value>> = chunks
        .unwrap_or(&[])
        .iter()
        .map(|chunk| (chunk.chunk_id.as_str(), &chunk.metadata))
        .collect();

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename);
    let mut file = std::fs::File::create(&path)?;

    let mut lines = Vec::with_capacity(vectors.len());
    for vector in vectors {
        let metadata = metadata_by_id
            .get(vector.chunk_id.as_str())
            .map(|m| (*m).clone())
            .unwrap_or_default();
        let record = IndexRecord::from_vector(vector, dimension, metadata)?;
        lines.push(serde_json::to_string(&record).map_err(|source| IndexPrepError::Parse {
            line: lines.len() + 1,
            source,
        })?);
    }

    file.write_all(lines.join("\n").as_bytes())?;
    if !lines.is_empty() {
        file.write_all(b"\n")?;
    }

    Ok(path)
}

/// Parse a JSONL file written by [`write_index`] back into [`IndexRecord`]s, preserving order.
///
/// # Errors
/// Returns [`IndexPrepError::Io`] if the file cannot be read, or [`IndexPrepError::Parse`] if
/// any line is not a valid `IndexRecord`.
pub fn read_index(path: &Path) -> Result<Vec<IndexRecord>, IndexPrepError> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| IndexPrepError::Parse {
                line: i + 1,
                source,
            })
        })
        .collect()
}
