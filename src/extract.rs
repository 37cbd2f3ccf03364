use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;

/// `axum::Json` whose rejection is an `AppError`, so malformed bodies get
/// the same 400 shape as every other validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation("Invalid request body".into())
    }
}
