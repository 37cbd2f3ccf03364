use serde::{Deserialize, Serialize};

use crate::{auth::repo_types::User, users::dto::UserIdField};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub address: Option<String>,
    pub birthdate: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Minimal user returned after login.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionProfile>,
}

/// User as seen by the logged-in browser. Everything but the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub birth_date: Option<String>,
    pub last_company: Option<String>,
    pub job_type: Option<String>,
    pub job_type_detail: Option<String>,
}

impl From<User> for SessionProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            address: u.address,
            birth_date: u.birth_date.map(|d| d.to_string()),
            last_company: u.last_company,
            job_type: u.job_type,
            job_type_detail: u.job_type_detail,
        }
    }
}

/// Final onboarding step: career fields plus automatic login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub last_company: Option<String>,
    pub job_type: Option<String>,
    pub job_type_detail: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationResponse {
    pub message: String,
    pub user_id: i64,
    pub redirect_to: String,
}
