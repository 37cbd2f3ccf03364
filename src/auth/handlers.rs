use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CompleteRegistrationRequest, CompleteRegistrationResponse, LoginRequest,
            LoginResponse, PublicUser, RegisterRequest, RegisterResponse, SessionResponse,
        },
        extractors::SessionUser,
        repo_types::NewUser,
        services::{
            hash_password, is_long_enough, is_valid_email, issue_session, parse_birthdate,
            verify_password, MIN_PASSWORD_LEN,
        },
    },
    error::AppError,
    extract::ApiJson,
    state::AppState,
    users::{
        dto::{non_blank, require_user_id},
        repo_types::CareerUpdate,
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/session", get(session))
        .route("/complete-registration", post(complete_registration))
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already registered".into())
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        warn!("registration missing required fields");
        return Err(AppError::validation(
            "Name, email and password are required",
        ));
    }

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }

    if !is_long_enough(&payload.password) {
        warn!("password too short");
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let birth_date = parse_birthdate(payload.birthdate.as_deref())?;

    // Fast path; the insert below still loses gracefully on a race.
    if state.store.find_user_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(email_taken());
    }

    let new_user = NewUser {
        name,
        address: non_blank(payload.address.as_deref()).map(str::to_string),
        birth_date,
        email,
        password_hash: hash_password(&payload.password)?,
    };

    let Some(user_id) = state.store.create_user(&new_user).await? else {
        warn!(email = %new_user.email, "email registered concurrently");
        return Err(email_taken());
    };

    info!(user_id, email = %new_user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered".into(),
            user_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() || payload.password.is_empty() {
        warn!("login missing credentials");
        return Err(AppError::validation("Email and password are required"));
    }

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(invalid_credentials());
    }

    let cookie = issue_session(&state, user.id).await?;

    info!(user_id = user.id, "user logged in");
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Logged in".into(),
            user: PublicUser::from(&user),
        }),
    ))
}

#[instrument(skip_all)]
pub async fn session(session: Result<SessionUser, AppError>) -> Response {
    match session {
        Ok(SessionUser(user)) => Json(SessionResponse {
            authenticated: true,
            user: Some(user.into()),
        })
        .into_response(),
        Err(AppError::Unauthorized(_)) => (
            StatusCode::UNAUTHORIZED,
            Json(SessionResponse {
                authenticated: false,
                user: None,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[instrument(skip(state, payload))]
pub async fn complete_registration(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CompleteRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;

    let update = CareerUpdate {
        last_company: non_blank(payload.last_company.as_deref()).map(str::to_string),
        job_type: non_blank(payload.job_type.as_deref()).map(str::to_string),
        job_type_detail: non_blank(payload.job_type_detail.as_deref()).map(str::to_string),
    };

    if !state.store.update_career(user_id, &update).await? {
        warn!(user_id, "complete registration for unknown user");
        return Err(AppError::not_found("User not found"));
    }

    let cookie = issue_session(&state, user_id).await?;

    info!(user_id, "registration completed");
    Ok((
        [(SET_COOKIE, cookie)],
        Json(CompleteRegistrationResponse {
            message: "Registration completed".into(),
            user_id,
            redirect_to: "/home".into(),
        }),
    ))
}
