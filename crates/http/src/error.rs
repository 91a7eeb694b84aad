//! Error handling for the HTTP layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every failing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_status: String,
    pub error_message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be decoded into the expected shape
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Id-keyed operation matched no row
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Connection, statement, or row decode failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_status(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Bad Request",
            AppError::NotFound { .. } => "Data Not Found",
            AppError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_status = self.error_status();

        let error_message = match self {
            AppError::Validation { message } | AppError::NotFound { message } => message,
            // `{:#}` keeps the whole context chain down to the driver error.
            AppError::Internal(e) => format!("{:#}", e),
        };

        if status.is_server_error() {
            tracing::error!(
                status_code = %status.as_u16(),
                error_status,
                error = %error_message,
                "request failed"
            );
        } else {
            tracing::warn!(
                status_code = %status.as_u16(),
                error_status,
                error = %error_message,
                "request rejected"
            );
        }

        let body = ErrorBody {
            error_status: error_status.to_string(),
            error_message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_uses_data_not_found_payload() {
        let response = AppError::not_found("book with id 7 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(
            body,
            ErrorBody {
                error_status: "Data Not Found".to_string(),
                error_message: "book with id 7 not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request() {
        let response = AppError::validation("missing field `title`").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.error_status, "Bad Request");
    }

    #[tokio::test]
    async fn internal_error_carries_underlying_detail() {
        let internal_error = anyhow::anyhow!("connection refused").context("failed to acquire connection");
        let response = AppError::Internal(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error_status, "Internal Server Error");
        assert!(body.error_message.contains("failed to acquire connection"));
        assert!(body.error_message.contains("connection refused"));
    }

    #[test]
    fn anyhow_converts_to_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, AppError::Internal(_)));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
