use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::{repo_types::User, services::token_from_headers};
use crate::{error::AppError, state::AppState};

/// Resolves the session token (cookie or bearer) to a live user.
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

        match state.store.find_session_user(&token, state.clock.now()).await? {
            Some(user) => Ok(SessionUser(user)),
            None => {
                warn!("unknown or expired session");
                Err(AppError::Unauthorized("Session is invalid or expired".into()))
            }
        }
    }
}
