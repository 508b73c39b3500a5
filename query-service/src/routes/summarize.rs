//! `POST /summarize`: streams generative-model output as Server-Sent Events, one `data:` frame
//! per chunk, terminated by `data: [DONE]` or, on mid-stream failure, `event: error`.
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use futures::StreamExt;
use serde_json::Value;

use crate::error::ApiError;
use crate::summary_backend::SummaryBackend;

fn default_max_tokens() -> u32 {
    150
}

/// Pulls `content`/`max_tokens` out of a loosely-typed JSON body ourselves, rather than via a
/// typed `Deserialize` struct, so a missing or wrongly-typed field surfaces as the contract's
/// 400 `{error, detail}` envelope instead of axum's `Json` extractor 422 rejection.
fn parse_request(body: &Value) -> Result<(String, u32), ApiError> {
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation("content is required and must be a string"))?;
    if content.trim().is_empty() {
        return Err(ApiError::validation("content must be non-empty"));
    }

    let max_tokens = match body.get("max_tokens") {
        None | Some(Value::Null) => default_max_tokens(),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ApiError::validation("max_tokens must be a positive integer"))?,
    };
    if max_tokens == 0 {
        return Err(ApiError::validation("max_tokens must be positive"));
    }

    Ok((content.to_string(), max_tokens))
}

pub async fn summarize(
    State(backend): State<Arc<dyn SummaryBackend>>,
    Json(body): Json<Value>,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>>, ApiError> {
    let (content, max_tokens) = parse_request(&body)?;

    let upstream = backend
        .stream_summary(&content, max_tokens)
        .await
        .map_err(ApiError::dependency)?;

    let events = async_stream::stream! {
        let mut upstream = upstream;
        let mut failed = false;
        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(text) => yield Ok(Event::default().data(text)),
                Err(message) => {
                    yield Ok(Event::default().event("error").data(message));
                    failed = true;
                    break;
                }
            }
        }
        if !failed {
            yield Ok(Event::default().data("[DONE]"));
        }
    };

    Ok(Sse::new(events))
}
