use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `userId` as the onboarding pages send it: a number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserIdField {
    Number(i64),
    Text(String),
}

pub(crate) fn require_user_id(field: Option<&UserIdField>) -> Result<i64, AppError> {
    match field {
        None => Err(AppError::validation("userId is required")),
        Some(UserIdField::Number(id)) => positive(*id),
        Some(UserIdField::Text(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(AppError::validation("userId is required"));
            }
            raw.parse::<i64>()
                .map_err(|_| AppError::validation("Invalid userId"))
                .and_then(positive)
        }
    }
}

/// Ids start at 1.
fn positive(id: i64) -> Result<i64, AppError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::validation("Invalid userId"))
    }
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub last_company: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyByIdRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub last_company: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobTypeRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub job_type: Option<String>,
    pub job_type_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobTypeDetailRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub job_type_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub atmosphere: Option<Vec<String>>,
    pub age_group: Option<Vec<String>>,
    pub work_style: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrientationRequest {
    #[serde(default)]
    pub user_id: Option<UserIdField>,
    pub work_purpose: Option<Vec<String>>,
    pub ideal_role: Option<Vec<String>>,
    pub contribute: Option<Vec<String>>,
    pub personal_values: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub success: bool,
}

impl UpdateResponse {
    pub fn saved(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: true,
        }
    }
}
