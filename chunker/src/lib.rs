#![allow(clippy::missing_docs_in_private_items)]
//! Splits a cleaned HTML document into overlapping, bounded-length text windows.
//!
//! Pure and deterministic: no I/O, no async, no external calls. [`chunk_html`] always returns
//! the same output for the same input and configuration.

mod text;
mod tokenize;
mod types;

pub use text::strip_html;
pub use types::{ChunkerConfig, ChunkerError, TextChunk};

use tokenize::tokenize;

/// Convert one cleaned HTML document into an ordered list of [`TextChunk`]s.
///
/// # Errors
/// Returns [`ChunkerError::InvalidInput`] when `config.overlap >= config.chunk_size` or
/// `config.chunk_size == 0`.
pub fn chunk_html(
    html: &str,
    doc_id: &str,
    metadata: serde_json::Map<String, serde_json::Value>,
    config: &ChunkerConfig,
) -> Result<Vec<TextChunk>, ChunkerError> {
    config.validate()?;

    let plain_text = strip_html(html);
    let tokens = tokenize(&plain_text);

    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let step = config.chunk_size - config.overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    while start < tokens.len() {
        let end = (start + config.chunk_size).min(tokens.len());
        let window = &tokens[start..end];

        let mut chunk_metadata = metadata.clone();
        chunk_metadata.insert(
            "source".to_string(),
            serde_json::Value::String(doc_id.to_string()),
        );

        chunks.push(TextChunk::new(
            format!("{doc_id}_chunk_{index}"),
            window.join(" "),
            window.len(),
            doc_id.to_string(),
            chunk_metadata,
        )?);

        if end == tokens.len() {
            break;
        }
        start += step;
        index += 1;
    }

    Ok(chunks)
}
