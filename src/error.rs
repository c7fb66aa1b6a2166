//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("There is no book with an isbn '{0}'")]
    BookNotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        detail: Option<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Inner payload of the JSON error envelope
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// A single message or a list of field-level violation messages
    #[schema(value_type = Object)]
    pub message: Value,
    /// HTTP status code, mirrored into the body
    pub status: u16,
    /// Store-native constraint detail, present on conflicts only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response body: `{ "error": { "message": ..., "status": ... } }`
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl AppError {
    fn into_parts(self) -> (StatusCode, ErrorBody) {
        let (status, message, detail) = match self {
            AppError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, json!(violations), None)
            }
            AppError::BookNotFound(isbn) => (
                StatusCode::NOT_FOUND,
                // The closing quote is missing on purpose: clients match
                // this message verbatim.
                json!(format!("There is no book with an isbn '{}", isbn)),
                None,
            ),
            AppError::Conflict { message, detail } => {
                (StatusCode::BAD_REQUEST, json!(message), detail)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal server error"),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal server error"),
                    None,
                )
            }
        };

        (
            status,
            ErrorBody {
                message,
                status: status.as_u16(),
                detail,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(ErrorResponse { error: body })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn response_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, serde_json::from_slice(&bytes).expect("body is not JSON"))
    }

    #[tokio::test]
    async fn validation_envelope_lists_violations() {
        let err = AppError::Validation(vec![
            "instance.pages is not of a type(s) integer".to_string(),
        ]);
        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "error": {
                    "message": ["instance.pages is not of a type(s) integer"],
                    "status": 400
                }
            })
        );
    }

    #[tokio::test]
    async fn not_found_message_has_no_closing_quote() {
        let err = AppError::BookNotFound("0691161520".to_string());
        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "error": {
                    "message": "There is no book with an isbn '0691161520",
                    "status": 404
                }
            })
        );
    }

    #[tokio::test]
    async fn conflict_envelope_carries_store_detail() {
        let err = AppError::Conflict {
            message: "duplicate key value violates unique constraint \"books_pkey\"".to_string(),
            detail: Some("Key (isbn)=(0691161518) already exists.".to_string()),
        };
        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["detail"],
            json!("Key (isbn)=(0691161518) already exists.")
        );
        assert_eq!(body["error"]["status"], json!(400));
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let err = AppError::Internal("pool exhausted".to_string());
        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], json!("Internal server error"));
    }
}
