//! Streaming generative summarization, abstracted behind a trait so `/summarize` tests can
//! inject a deterministic token sequence instead of a live model call.
use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

/// One emitted chunk: `Ok(text)` for a token/fragment, `Err(message)` for a terminal
/// mid-stream failure.
pub type SummaryChunk = Result<String, String>;

#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn stream_summary(
        &self,
        content: &str,
        max_tokens: u32,
    ) -> Result<BoxStream<'static, SummaryChunk>, String>;
}

/// Calls the external generative model's chat-completion streaming API.
pub struct OpenAiSummaryBackend {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiSummaryBackend {
    pub fn new(client: async_openai::Client<async_openai::config::OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SummaryBackend for OpenAiSummaryBackend {
    async fn stream_summary(
        &self,
        content: &str,
        max_tokens: u32,
    ) -> Result<BoxStream<'static, SummaryChunk>, String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(content.to_string())
            .build()
            .map_err(|err| err.to_string())?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .max_tokens(max_tokens)
            .messages([message.into()])
            .build()
            .map_err(|err| err.to_string())?;

        let upstream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|err| err.to_string())?;

        let mapped = upstream.map(|item| match item {
            Ok(response) => Ok(response
                .choices
                .first()
                .and_then(|choice| choice.delta.content.clone())
                .unwrap_or_default()),
            Err(err) => Err(err.to_string()),
        });

        Ok(Box::pin(mapped))
    }
}
