use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{Neighbor, QueryClientConfig, QueryClientError};

/// Issues one nearest-neighbor lookup against the deployed ANN index. A trait so query-service
/// tests can stub the managed index without a network dependency.
#[async_trait]
pub trait AnnBackend: Send + Sync {
    async fn find_neighbors(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, QueryClientError>;
}

/// Calls the managed ANN service's `findNeighbors` REST endpoint.
pub struct HttpAnnBackend {
    http: reqwest::Client,
    find_neighbors_url: String,
    deployed_index_id: String,
}

impl HttpAnnBackend {
    pub fn new(http: reqwest::Client, config: &QueryClientConfig) -> Self {
        let find_neighbors_url = format!(
            "https://{}-aiplatform.googleapis.com/v1/projects/{}/locations/{}/indexEndpoints/{}:findNeighbors",
            config.location, config.project, config.location, config.endpoint_id
        );
        Self {
            http,
            find_neighbors_url,
            deployed_index_id: config.deployed_index_id.clone(),
        }
    }
}

#[derive(Deserialize)]
struct FindNeighborsResponse {
    #[serde(default)]
    nearest_neighbors: Vec<NearestNeighborsEntry>,
}

#[derive(Deserialize)]
struct NearestNeighborsEntry {
    #[serde(default)]
    neighbors: Vec<NeighborEntry>,
}

#[derive(Deserialize)]
struct NeighborEntry {
    datapoint: NeighborDatapoint,
    distance: f32,
}

#[derive(Deserialize)]
struct NeighborDatapoint {
    #[serde(rename = "datapointId")]
    datapoint_id: String,
}

#[async_trait]
impl AnnBackend for HttpAnnBackend {
    async fn find_neighbors(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, QueryClientError> {
        let body = serde_json::json!({
            "deployedIndexId": self.deployed_index_id,
            "queries": [{
                "datapoint": { "featureVector": embedding },
                "neighborCount": top_k,
            }],
        });

        let response = self
            .http
            .post(&self.find_neighbors_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| QueryClientError::Ann(err.to_string()))?;

        if !response.status().is_success() {
            return Err(QueryClientError::Ann(format!(
                "ann endpoint returned status {}",
                response.status()
            )));
        }

        let parsed: FindNeighborsResponse = response
            .json()
            .await
            .map_err(|err| QueryClientError::Ann(err.to_string()))?;

        Ok(parsed
            .nearest_neighbors
            .into_iter()
            .flat_map(|entry| entry.neighbors)
            .map(|neighbor| Neighbor {
                id: neighbor.datapoint.datapoint_id,
                distance: neighbor.distance,
            })
            .collect())
    }
}
