//! Thin wrapper over the external embedding model, shared by the offline embedder and the
//! online query client so both call the same model the same way.
use async_openai::types::CreateEmbeddingRequestArgs;
use tracing::debug;

use crate::error::AppError;

/// Request a batch of embeddings, preserving input order in the returned vector.
///
/// # Errors
/// Returns [`AppError::OpenAi`] if the request cannot be built or the call fails, and
/// [`AppError::Embedding`] if the response is missing embedding data for any input.
pub async fn generate_embeddings(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    model: &str,
    dimensions: u32,
    inputs: &[String],
) -> Result<Vec<Vec<f32>>, AppError> {
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let request = CreateEmbeddingRequestArgs::default()
        .model(model)
        .dimensions(dimensions)
        .input(inputs)
        .build()?;

    let response = client.embeddings().create(request).await?;

    if response.data.len() != inputs.len() {
        return Err(AppError::Embedding(format!(
            "expected {} embeddings, received {}",
            inputs.len(),
            response.data.len()
        )));
    }

    let mut by_index = response.data;
    by_index.sort_by_key(|datum| datum.index);

    let embeddings: Vec<Vec<f32>> = by_index.into_iter().map(|datum| datum.embedding).collect();

    debug!(count = embeddings.len(), dimensions, "generated embeddings");

    Ok(embeddings)
}

/// Request a single embedding. A thin convenience over [`generate_embeddings`] for the query
/// path, which only ever embeds one query string per request.
///
/// # Errors
/// See [`generate_embeddings`].
pub async fn generate_embedding(
    client: &async_openai::Client<async_openai::config::OpenAIConfig>,
    model: &str,
    dimensions: u32,
    input: &str,
) -> Result<Vec<f32>, AppError> {
    let inputs = [input.to_string()];
    let mut embeddings = generate_embeddings(client, model, dimensions, &inputs).await?;
    embeddings
        .pop()
        .ok_or_else(|| AppError::Embedding("no embedding returned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_input_performs_no_call_and_returns_empty_output() {
        let client = async_openai::Client::with_config(
            async_openai::config::OpenAIConfig::new().with_api_base("http://127.0.0.1:1"),
        );
        let result = generate_embeddings(&client, "text-embedding-004", 768, &[])
            .await
            .expect("empty input is infallible");
        assert!(result.is_empty());
    }
}
