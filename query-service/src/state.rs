//! Shared, cloneable request state, following the router-state pattern of splitting shared
//! resources into independently `FromRef`-extractable pieces rather than one monolithic struct
//! every handler has to destructure.
use std::sync::Arc;

use axum::extract::FromRef;
use common::config::AppConfig;
use query_client::QueryClient;

use crate::cache::SearchCache;
use crate::summary_backend::SummaryBackend;

#[derive(Clone)]
pub struct QueryState {
    pub config: Arc<AppConfig>,
    pub query_client: Arc<QueryClient>,
    pub cache: Arc<SearchCache>,
    pub summary_backend: Arc<dyn SummaryBackend>,
}

impl FromRef<QueryState> for Arc<AppConfig> {
    fn from_ref(state: &QueryState) -> Self {
        state.config.clone()
    }
}

impl FromRef<QueryState> for Arc<QueryClient> {
    fn from_ref(state: &QueryState) -> Self {
        state.query_client.clone()
    }
}

impl FromRef<QueryState> for Arc<SearchCache> {
    fn from_ref(state: &QueryState) -> Self {
        state.cache.clone()
    }
}

impl FromRef<QueryState> for Arc<dyn SummaryBackend> {
    fn from_ref(state: &QueryState) -> Self {
        state.summary_backend.clone()
    }
}
