#![allow(clippy::missing_docs_in_private_items)]
//! Offline batch pipeline: reads HTML documents from a directory, chunks each one, embeds the
//! chunks, and serializes the resulting vectors to a single JSONL index file.
//!
//! Runs as a single-threaded batch job from the caller's perspective: documents are processed
//! one at a time, in directory-listing order, and retries inside the embedder happen
//! sequentially within a batch. Exposed as a plain async library function, not a CLI.

use std::path::{Path, PathBuf};

use chunker::{chunk_html, ChunkerConfig};
use embedder::{embed, EmbedderConfig};
use index_prep::write_index;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("failed to read documents directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read document {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("chunking failed for {doc_id}: {source}")]
    Chunk {
        doc_id: String,
        #[source]
        source: chunker::ChunkerError,
    },
    #[error("embedding failed: {0}")]
    Embed(#[from] embedder::EmbedderError),
    #[error("index serialization failed: {0}")]
    IndexPrep(#[from] index_prep::IndexPrepError),
}

/// Configuration for one end-to-end run of the offline pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub chunker: ChunkerConfig,
    pub embedder: EmbedderConfig,
    pub output_dir: PathBuf,
    pub output_filename: String,
}

/// Result of a completed pipeline run: the output file path and the number of chunks/vectors
/// it contains.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub index_path: PathBuf,
    pub document_count: usize,
    pub chunk_count: usize,
}

/// Read every `*.html` file directly under `documents_dir`, chunk and embed each one in turn,
/// and write the combined vectors to one JSONL index file.
///
/// Documents are processed sequentially; a chunking or embedding failure on one document
/// aborts the whole run rather than skipping it, matching the Embedder's "fails atomically for
/// that batch" contract extended to the pipeline as a whole.
///
/// # Errors
/// Returns [`IngestionError`] if the directory cannot be listed, a document cannot be read or
/// chunked, the embedding model cannot be reached after retries, or the index file cannot be
/// written.
pub async fn run_pipeline(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    documents_dir: &Path,
    config: &PipelineConfig,
) -> Result<PipelineReport, IngestionError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(documents_dir)
        .map_err(|source| IngestionError::ReadDir {
            path: documents_dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("html"))
        .collect();
    paths.sort();

    let mut all_chunks = Vec::new();

    for path in &paths {
        let doc_id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("document")
            .to_string();

        let html = std::fs::read_to_string(path).map_err(|source| IngestionError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let chunks = chunk_html(&html, &doc_id, serde_json::Map::new(), &config.chunker)
            .map_err(|source| IngestionError::Chunk {
                doc_id: doc_id.clone(),
                source,
            })?;

        info!(doc_id = %doc_id, chunk_count = chunks.len(), "chunked document");
        all_chunks.extend(chunks);
    }

    if all_chunks.is_empty() {
        warn!(dir = %documents_dir.display(), "no html documents found, nothing to embed");
    }

    let vectors = embed(client, &all_chunks, &config.embedder).await?;

    let index_path = write_index(
        &vectors,
        Some(&all_chunks),
        &config.output_dir,
        &config.output_filename,
        config.embedder.embedding_dimension,
    )?;

    info!(
        path = %index_path.display(),
        documents = paths.len(),
        chunks = all_chunks.len(),
        "wrote index file"
    );

    Ok(PipelineReport {
        index_path,
        document_count: paths.len(),
        chunk_count: all_chunks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_directory_produces_empty_index() {
        let docs_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        let client = async_openai::Client::with_config(
            async_openai::config::OpenAIConfig::new().with_api_base("http://127.0.0.1:1"),
        );
        let config = PipelineConfig {
            chunker: ChunkerConfig::default(),
            embedder: EmbedderConfig::default(),
            output_dir: out_dir.path().to_path_buf(),
            output_filename: "index.jsonl".to_string(),
        };

        let report = run_pipeline(&client, docs_dir.path(), &config).await.unwrap();
        assert_eq!(report.document_count, 0);
        assert_eq!(report.chunk_count, 0);

        let raw = std::fs::read_to_string(&report.index_path).unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_surfaces_read_dir_error() {
        let out_dir = tempfile::tempdir().unwrap();
        let client = async_openai::Client::with_config(
            async_openai::config::OpenAIConfig::new().with_api_base("http://127.0.0.1:1"),
        );
        let config = PipelineConfig {
            chunker: ChunkerConfig::default(),
            embedder: EmbedderConfig::default(),
            output_dir: out_dir.path().to_path_buf(),
            output_filename: "index.jsonl".to_string(),
        };

        let err = run_pipeline(&client, Path::new("/nonexistent/path/xyz"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::ReadDir { .. }));
    }
}
