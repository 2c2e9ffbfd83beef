use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;

use super::models::FeedbackResponse;
use super::router::ApiResponse;
use super::validation::PayloadError;
use crate::storage::StorageError;

/// Domain errors raised by the operation handlers.
///
/// `Display` is the client-facing message placed in the `{success, message}`
/// envelope. Backend detail stays in the `#[source]` chain and is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload")]
    InvalidPayload(#[from] PayloadError),
    #[error("error reading request body")]
    BodyRead(#[source] axum::Error),
    #[error("payload too large: {0} bytes")]
    PayloadTooLarge(usize),
    #[error("only numbers accepted in page parameter")]
    NonNumericPage(String),
    #[error("page numbers start at 1")]
    PageBelowOne(i64),
    #[error("requested page exceeds total pages")]
    PageOutOfRange { requested: usize, total_pages: usize },
    #[error("resource not found with the ID provided")]
    NotFound(String),
    #[error("unsupported HTTP method")]
    MethodNotAllowed(Method),
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("error encoding response")]
    Encoding(#[from] serde_json::Error),
}

impl ApiError {
    pub fn storage(context: &'static str, source: StorageError) -> Self {
        ApiError::Storage { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_)
            | ApiError::BodyRead(_)
            | ApiError::NonNumericPage(_)
            | ApiError::PageBelowOne(_)
            | ApiError::PageOutOfRange { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage { .. } | ApiError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        ApiResponse::feedback(err.status_code(), FeedbackResponse::error(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        ApiResponse::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_hide_backend_detail() {
        let err = ApiError::storage(
            "error retrieving item",
            StorageError::Backend("ResourceNotFoundException: table gone".into()),
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = ApiResponse::from(err);
        assert!(!response.body.contains("table gone"));
        assert_eq!(
            response.body,
            r#"{"success":false,"message":"error retrieving item"}"#
        );
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::InvalidPayload(PayloadError::MissingId).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NonNumericPage("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PageOutOfRange {
                requested: 10,
                total_pages: 2
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("missing".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MethodNotAllowed(Method::PATCH).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
