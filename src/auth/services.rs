use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use time::{macros::format_description, Date, Duration as TimeDuration};
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    auth::repo_types::Session, config::SessionConfig, error::AppError, state::AppState,
};

pub const SESSION_COOKIE: &str = "session_token";
pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn is_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Accepts `YYYY-MM-DD` or an ISO timestamp starting with one. Blank means absent.
pub(crate) fn parse_birthdate(raw: Option<&str>) -> Result<Option<Date>, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(r) => r,
    };
    let day = raw.get(..10).unwrap_or(raw);
    Date::parse(day, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| AppError::validation("Invalid birthdate"))
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

pub(crate) fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub(crate) fn session_cookie(token: &str, cfg: &SessionConfig) -> String {
    let max_age = TimeDuration::days(cfg.ttl_days).whole_seconds();
    let secure = if cfg.cookie_secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={max_age}; SameSite=Lax{secure}")
}

/// Session token from the `session_token` cookie, falling back to a bearer header.
pub(crate) fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Stores a fresh session for `user_id` and returns the `Set-Cookie` value.
pub(crate) async fn issue_session(state: &AppState, user_id: i64) -> Result<String, AppError> {
    let now = state.clock.now();
    let ttl_days = state.config.session.ttl_days;
    let expires_at = now
        .checked_add(TimeDuration::days(ttl_days))
        .ok_or_else(|| anyhow::anyhow!("session expiry out of range (ttl {ttl_days} days)"))?;
    let session = Session {
        token: new_session_token(),
        user_id,
        expires_at,
    };
    state.store.create_session(&session).await?;
    debug!(user_id, expires_at = %session.expires_at, "session issued");
    Ok(session_cookie(&session.token, &state.config.session))
}
