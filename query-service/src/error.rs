//! HTTP-facing error envelope. Maps [`common::error::AppError`] and
//! [`query_client::QueryClientError`] onto a status code and the two-field `{error, detail}`
//! JSON body the contract requires, the same shape `api_router`'s error type used for its own
//! `AppError`.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::error::{AppError, ErrorCategory};
use serde::Serialize;

#[derive(Debug)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
    pub status: StatusCode,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    detail: String,
}

impl ApiError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self {
            error: "validation_error".to_string(),
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn dependency(detail: impl Into<String>) -> Self {
        Self {
            error: "dependency_error".to_string(),
            detail: detail.into(),
            status: StatusCode::BAD_GATEWAY,
        }
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self {
            error: "timeout".to_string(),
            detail: detail.into(),
            status: StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = match err.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Dependency => StatusCode::BAD_GATEWAY,
            ErrorCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error = match status {
            StatusCode::BAD_REQUEST => "validation_error",
            StatusCode::BAD_GATEWAY => "dependency_error",
            StatusCode::GATEWAY_TIMEOUT => "timeout",
            _ => "internal_error",
        }
        .to_string();
        Self {
            error,
            detail: err.to_string(),
            status,
        }
    }
}

impl From<query_client::QueryClientError> for ApiError {
    fn from(err: query_client::QueryClientError) -> Self {
        ApiError::dependency(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.error,
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}
