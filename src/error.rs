//! Error types for the block cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Block Cache Error Enum ==
/// Unified error type for the block cache.
#[derive(Error, Debug)]
pub enum BlockCacheError {
    /// A required cache key field is absent
    #[error("Please define a `{0}` key")]
    MissingKey(&'static str),

    /// No publishable block exists for the requested identifier
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The URL generator has no route registered under this name
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// The renderer could not produce a fragment
    #[error("Render failed: {0}")]
    Render(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for BlockCacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Callback clients only look at the status; the body stays empty.
            BlockCacheError::BlockNotFound(_) => return StatusCode::NOT_FOUND.into_response(),
            BlockCacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BlockCacheError::MissingKey(_)
            | BlockCacheError::UnknownRoute(_)
            | BlockCacheError::Render(_)
            | BlockCacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the block cache.
pub type Result<T> = std::result::Result<T, BlockCacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_field() {
        let err = BlockCacheError::MissingKey("updated_at");
        assert_eq!(err.to_string(), "Please define a `updated_at` key");
    }

    #[tokio::test]
    async fn test_block_not_found_has_empty_body() {
        let response = BlockCacheError::BlockNotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BlockCacheError::InvalidRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BlockCacheError::Render("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BlockCacheError::MissingKey("block_id").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
