use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub birth_date: Option<Date>,
    pub email: String,
    pub password_hash: String, // Argon2 hash, never leaves the server
    pub last_company: Option<String>,
    pub job_type: Option<String>,
    pub job_type_detail: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Validated registration data, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub address: Option<String>,
    pub birth_date: Option<Date>,
    pub email: String,
    pub password_hash: String,
}

/// Server-side session row. The token is the cookie value.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: OffsetDateTime,
}
