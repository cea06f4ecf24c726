//! Error types for the price API.
//!
//! ## Status Mapping
//! ```text
//! CoreError::PriceNotFound        → 404 Not Found
//! missing query parameter         → 400 Bad Request
//! non-integer id parameter        → 400 Bad Request
//! unparseable dateTime            → 400 Bad Request
//! anything else (store failures)  → 500 Internal Server Error
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricing_core::CoreError;
use tracing::{error, warn};

use crate::dto::ErrorResponse;

/// Price API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Required parameter '{0}' is missing")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be of type {expected}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingParameter(_)
            | ApiError::TypeMismatch { .. }
            | ApiError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the JSON error body for a request path.
    pub fn to_body(&self, path: &str) -> ErrorResponse {
        let status = self.status();
        ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
            path: path.to_string(),
        }
    }

    /// Converts into a response carrying the request path.
    pub fn into_response_at(self, path: &str) -> Response {
        match &self {
            ApiError::Internal(msg) => error!(path, error = %msg, "Request failed"),
            other => warn!(path, status = other.status().as_u16(), error = %other, "Request rejected"),
        }

        (self.status(), Json(self.to_body(path))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PriceNotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Fallback for call sites that have no request path at hand.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_at("")
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::{BrandId, ProductId};

    #[test]
    fn test_not_found_body() {
        let err: ApiError = CoreError::not_found(ProductId::new(99999), BrandId::new(1)).into();
        let body = err.to_body("/api/prices/v1");

        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(
            body.message,
            "No applicable price found for product ID 99999 and brand ID 1"
        );
        assert_eq!(body.path, "/api/prices/v1");
    }

    #[test]
    fn test_bad_request_messages() {
        let body = ApiError::MissingParameter("productId").to_body("/api/prices/v2");
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "Required parameter 'productId' is missing");

        let err = ApiError::TypeMismatch {
            name: "brandId",
            expected: "integer",
        };
        assert_eq!(err.to_string(), "Parameter 'brandId' must be of type integer");
    }

    #[test]
    fn test_store_failure_is_internal() {
        let err: ApiError = CoreError::Store("disk I/O error".to_string()).into();
        let body = err.to_body("/api/prices/v2");

        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert!(body.message.starts_with("An unexpected error occurred: "));
    }
}
