use sqlx::types::Json;

/// Workplace preferences picked during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSelections {
    pub atmosphere: Vec<String>,
    pub age_group: Vec<String>,
    pub work_style: Vec<String>,
}

/// Work orientation answers picked during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientationSelections {
    pub work_purpose: Vec<String>,
    pub ideal_role: Vec<String>,
    pub contribute: Vec<String>,
    pub personal_values: Vec<String>,
}

/// Career fields written together when registration is completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerUpdate {
    pub last_company: Option<String>,
    pub job_type: Option<String>,
    pub job_type_detail: Option<String>,
}

/// Multi-select column value: NULL when nothing was selected.
pub fn json_list(values: &[String]) -> Option<Json<Vec<String>>> {
    if values.is_empty() {
        None
    } else {
        Some(Json(values.to_vec()))
    }
}
