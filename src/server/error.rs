//! Error responses of the HTTP boundary.
//!
//! Client mistakes travel back as structured JSON so the frontend can show
//! the message. Server-side failures are logged where they are raised and
//! answered with a constant body that leaks nothing.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body of a client error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human-readable description safe to show to end users
    pub message: String,
}

/// Failure modes of a request, mapped onto HTTP status codes
#[derive(Debug)]
pub enum ServerError {
    /// The request was malformed. The message is sent back to the caller.
    BadRequest(String),
    /// Something failed on our side. The caller only learns that it did.
    Internal,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
            }
            ServerError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bad_request_carries_a_structured_message() {
        let response = ServerError::BadRequest("wrong".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "wrong");
    }

    #[tokio::test]
    async fn test_internal_errors_are_opaque() {
        let response = ServerError::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Internal server error");
    }
}
