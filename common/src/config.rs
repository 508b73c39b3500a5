//! Environment-driven configuration, loaded and validated once at startup.
//!
//! `PROJECT_ID`, `LOCATION`, `INDEX_ENDPOINT_ID` and `DEPLOYED_INDEX_ID` are required; every
//! other field has a documented default. Startup fails fast with a message naming the missing
//! variable rather than deferring the failure to first use.
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVariable(String),
    #[error("invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Process-wide configuration for the query service and the offline pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_id: String,
    pub location: String,
    pub index_endpoint_id: String,
    pub deployed_index_id: String,
    pub embedding_model: String,
    pub summary_model: String,
    pub cache_ttl_seconds: u64,
    pub cache_max_entries: usize,
    pub default_top_k: usize,
    pub max_top_k: usize,
    pub request_timeout_seconds: u64,
    pub http_port: u16,
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_ttl_seconds = load_with_default("CACHE_TTL_SECONDS", 300)?;
        let cache_max_entries = load_with_default("CACHE_MAX_ENTRIES", 1000)?;
        let default_top_k = load_with_default("DEFAULT_TOP_K", 10)?;
        let max_top_k = load_with_default("MAX_TOP_K", 100)?;
        let request_timeout_seconds = load_with_default("REQUEST_TIMEOUT_SECONDS", 30)?;
        let http_port = load_with_default("HTTP_PORT", 8080)?;

        if default_top_k == 0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_TOP_K".into(),
                "must be at least 1".into(),
            ));
        }
        if max_top_k == 0 || default_top_k > max_top_k {
            return Err(ConfigError::InvalidValue(
                "MAX_TOP_K".into(),
                "must be at least 1 and at least DEFAULT_TOP_K".into(),
            ));
        }
        if cache_max_entries == 0 {
            return Err(ConfigError::InvalidValue(
                "CACHE_MAX_ENTRIES".into(),
                "must be at least 1".into(),
            ));
        }

        Ok(Self {
            project_id: load_required("PROJECT_ID")?,
            location: load_required("LOCATION")?,
            index_endpoint_id: load_required("INDEX_ENDPOINT_ID")?,
            deployed_index_id: load_required("DEPLOYED_INDEX_ID")?,
            embedding_model: load_optional("EMBEDDING_MODEL")
                .unwrap_or_else(|| "text-embedding-004".to_string()),
            summary_model: load_optional("SUMMARY_MODEL")
                .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            cache_ttl_seconds,
            cache_max_entries,
            default_top_k,
            max_top_k,
            request_timeout_seconds,
            http_port,
            openai_api_key: load_optional("OPENAI_API_KEY").unwrap_or_default(),
            openai_api_base: load_optional("OPENAI_API_BASE"),
        })
    }
}

fn load_required(key: &str) -> Result<String, ConfigError> {
    load_optional(key).ok_or_else(|| ConfigError::MissingVariable(key.to_string()))
}

fn load_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_with_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match load_optional(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), value)),
        None => Ok(default),
    }
}

/// Global configuration cache, populated once during process start.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Retrieve the loaded configuration. Panics if [`init_config`] has not run yet.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get().expect("config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
///
/// # Errors
/// Returns the first missing or malformed variable encountered.
pub fn init_config() -> Result<&'static AppConfig, ConfigError> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        project_id = %config.project_id,
        location = %config.location,
        embedding_model = %config.embedding_model,
        summary_model = %config.summary_model,
        cache_ttl_seconds = config.cache_ttl_seconds,
        cache_max_entries = config.cache_max_entries,
        http_port = config.http_port,
        "loaded configuration"
    );
    Ok(CONFIG.get_or_init(|| config))
}
