use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// Error kinds surfaced by the service layer.
///
/// Callers branch on the kind, never on the message text. Each kind maps to
/// exactly one HTTP status in `IntoResponse`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Resource not found".to_string(), Some(msg)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation failed".to_string(), Some(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request".to_string(), Some(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict".to_string(), Some(msg)),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), Some(msg)),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::failure(message, error));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_expected_status_codes() {
        let cases = [
            (AppError::NotFound("Province not found".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("Province must be provided".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("Store is already whitelisted".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("Missing Authorization header".into()), StatusCode::UNAUTHORIZED),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn database_errors_hide_detail_from_clients() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
