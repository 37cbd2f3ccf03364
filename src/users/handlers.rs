use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::SessionUser,
    error::AppError,
    extract::ApiJson,
    state::AppState,
    users::{
        dto::{
            non_blank, require_user_id, UpdateCompanyByIdRequest, UpdateCompanyRequest,
            UpdateJobTypeDetailRequest, UpdateJobTypeRequest, UpdateOrientationRequest,
            UpdatePreferencesRequest, UpdateResponse,
        },
        repo_types::{OrientationSelections, PreferenceSelections},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/update-company", post(update_company))
        .route(
            "/user/update-company-during-registration",
            post(update_company_during_registration),
        )
        .route("/user/update-job-type", post(update_job_type))
        .route("/user/update-job-type-detail", post(update_job_type_detail))
        .route("/user/update-preferences", post(update_preferences))
        .route("/user/update-orientation", post(update_orientation))
}

fn user_not_found(user_id: i64) -> AppError {
    warn!(user_id, "profile update for unknown user");
    AppError::not_found("User not found")
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, AppError> {
    non_blank(value).ok_or_else(|| AppError::validation(message))
}

/// Logged-in variant: the user comes from the session cookie.
#[instrument(skip(state, user, payload))]
pub async fn update_company(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    ApiJson(payload): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let company = required(payload.last_company.as_deref(), "Company name is required")?;

    if !state.store.update_last_company(user.id, company).await? {
        return Err(user_not_found(user.id));
    }

    info!(user_id = user.id, "last company updated");
    Ok(Json(UpdateResponse::saved("Company saved")))
}

#[instrument(skip(state, payload))]
pub async fn update_company_during_registration(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateCompanyByIdRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;
    let company = required(payload.last_company.as_deref(), "Company name is required")?;

    if !state.store.update_last_company(user_id, company).await? {
        return Err(user_not_found(user_id));
    }

    info!(user_id, "last company updated");
    Ok(Json(UpdateResponse::saved("Company saved")))
}

#[instrument(skip(state, payload))]
pub async fn update_job_type(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateJobTypeRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;
    let job_type = required(payload.job_type.as_deref(), "Job type is required")?;
    let detail = non_blank(payload.job_type_detail.as_deref());

    if !state.store.update_job_type(user_id, job_type, detail).await? {
        return Err(user_not_found(user_id));
    }

    info!(user_id, job_type, "job type updated");
    Ok(Json(UpdateResponse::saved("Job type saved")))
}

#[instrument(skip(state, payload))]
pub async fn update_job_type_detail(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateJobTypeDetailRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;
    let detail = required(
        payload.job_type_detail.as_deref(),
        "Job type detail is required",
    )?;

    if !state.store.update_job_type_detail(user_id, detail).await? {
        return Err(user_not_found(user_id));
    }

    info!(user_id, "job type detail updated");
    Ok(Json(UpdateResponse::saved("Job type detail saved")))
}

#[instrument(skip(state, payload))]
pub async fn update_preferences(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdatePreferencesRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;
    let prefs = PreferenceSelections {
        atmosphere: payload.atmosphere.unwrap_or_default(),
        age_group: payload.age_group.unwrap_or_default(),
        work_style: payload.work_style.unwrap_or_default(),
    };

    if !state.store.upsert_preferences(user_id, &prefs).await? {
        return Err(user_not_found(user_id));
    }

    info!(user_id, "workplace preferences saved");
    Ok(Json(UpdateResponse::saved("Workplace preferences saved")))
}

#[instrument(skip(state, payload))]
pub async fn update_orientation(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateOrientationRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let user_id = require_user_id(payload.user_id.as_ref())?;
    let orientation = OrientationSelections {
        work_purpose: payload.work_purpose.unwrap_or_default(),
        ideal_role: payload.ideal_role.unwrap_or_default(),
        contribute: payload.contribute.unwrap_or_default(),
        personal_values: payload.personal_values.unwrap_or_default(),
    };

    if !state.store.upsert_orientation(user_id, &orientation).await? {
        return Err(user_not_found(user_id));
    }

    info!(user_id, "work orientation saved");
    Ok(Json(UpdateResponse::saved("Work orientation saved")))
}
