use async_openai::error::OpenAIError;
use thiserror::Error;

/// Error taxonomy shared by every component in the pipeline.
///
/// Each variant maps to exactly one entry in the error handling design: callers that need an
/// HTTP status code (the query service) classify these through [`AppError::category`] rather
/// than matching on variants directly, so new variants stay easy to slot into an existing
/// category.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("embedding request failed: {0}")]
    Embedding(String),

    #[error("dependency call failed: {0}")]
    Dependency(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("openai error: {0}")]
    OpenAi(#[from] OpenAIError),

    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// The four-way classification the error handling design maps onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Dependency,
    Timeout,
    Internal,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::Schema(_) => ErrorCategory::Validation,
            Self::Embedding(_) | Self::Dependency(_) | Self::OpenAi(_) | Self::Reqwest(_) => {
                ErrorCategory::Dependency
            }
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Io(_) | Self::Serde(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_validation_errors() {
        assert_eq!(
            AppError::InvalidInput("bad q".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            AppError::Schema("dimension mismatch".into()).category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn categorizes_dependency_errors() {
        assert_eq!(
            AppError::Embedding("unreachable".into()).category(),
            ErrorCategory::Dependency
        );
        assert_eq!(
            AppError::Dependency("ann lookup failed".into()).category(),
            ErrorCategory::Dependency
        );
    }

    #[test]
    fn categorizes_timeout_and_internal_errors() {
        assert_eq!(
            AppError::Timeout("deadline exceeded".into()).category(),
            ErrorCategory::Timeout
        );
        assert_eq!(
            AppError::Internal("cache corrupted".into()).category(),
            ErrorCategory::Internal
        );
    }
}
