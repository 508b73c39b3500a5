use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryClientError {
    #[error("embedding backend failed: {0}")]
    Embedding(String),
    #[error("ann backend failed: {0}")]
    Ann(String),
}

/// Construction parameters for [`crate::QueryClient`], naming the managed ANN deployment it
/// talks to.
#[derive(Debug, Clone)]
pub struct QueryClientConfig {
    pub project: String,
    pub location: String,
    pub endpoint_id: String,
    pub deployed_index_id: String,
}

/// One neighbor returned by the ANN backend, before the distance-to-score conversion.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub id: String,
    pub distance: f32,
}

/// A ranked chunk-level match, as returned to the query service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub chunk_id: String,
    pub score: f32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}
