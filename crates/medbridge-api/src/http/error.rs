//! Application error type mapping to HTTP status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use medbridge_types::ai::AiError;
use medbridge_types::error::{RepositoryError, StorageError};

/// Application-level error that maps to HTTP responses.
///
/// Validation failures become 400s with a bare `error` field. AI failures
/// become 500s that keep the provider's message in a separate `message`
/// field so the frontend can show it. Repository and storage failures are
/// plain 500s.
#[derive(Debug)]
pub enum AppError {
    /// Rejected request input.
    Validation(String),
    /// The translation call failed.
    Translation(AiError),
    /// The summary call failed.
    Summary(AiError),
    /// Database failure.
    Database(RepositoryError),
    /// Audio blob storage failure.
    Storage(StorageError),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Database(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::Translation(e) => {
                tracing::error!(error = %e, "translation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Translation failed", "message": e.to_string() }),
                )
            }
            AppError::Summary(e) => {
                tracing::error!(error = %e, "summary generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Summary generation failed", "message": e.to_string() }),
                )
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
            }
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
