use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error returned by every handler. Maps to a status code and a
/// `{ "message", "success": false }` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(e) => match e.as_database_error() {
                Some(db) if db.is_unique_violation() => StatusCode::CONFLICT,
                Some(db) if db.is_foreign_key_violation() => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(e) => match status {
                StatusCode::CONFLICT => "Resource already exists".to_string(),
                StatusCode::NOT_FOUND => "User not found".to_string(),
                _ => {
                    tracing::error!(error = %e, "database error");
                    "A database error occurred".to_string()
                }
            },
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                "An internal server error occurred".to_string()
            }
        };

        (status, Json(json!({ "message": message, "success": false }))).into_response()
    }
}
