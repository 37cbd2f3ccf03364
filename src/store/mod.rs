use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    auth::repo_types::{NewUser, Session, User},
    users::repo_types::{CareerUpdate, OrientationSelections, PreferenceSelections},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Persistence used by the handlers.
///
/// Update methods return `false` when no user with the given id exists.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    /// Inserts the user and returns its id, or `None` if the email is taken.
    async fn create_user(&self, user: &NewUser) -> Result<Option<i64>, sqlx::Error>;

    async fn create_session(&self, session: &Session) -> Result<(), sqlx::Error>;

    /// Resolves a token to its user when the session is still valid at `now`.
    async fn find_session_user(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn update_last_company(&self, user_id: i64, last_company: &str)
        -> Result<bool, sqlx::Error>;

    async fn update_job_type(
        &self,
        user_id: i64,
        job_type: &str,
        job_type_detail: Option<&str>,
    ) -> Result<bool, sqlx::Error>;

    async fn update_job_type_detail(
        &self,
        user_id: i64,
        job_type_detail: &str,
    ) -> Result<bool, sqlx::Error>;

    async fn update_career(&self, user_id: i64, update: &CareerUpdate)
        -> Result<bool, sqlx::Error>;

    async fn upsert_preferences(
        &self,
        user_id: i64,
        prefs: &PreferenceSelections,
    ) -> Result<bool, sqlx::Error>;

    async fn upsert_orientation(
        &self,
        user_id: i64,
        orientation: &OrientationSelections,
    ) -> Result<bool, sqlx::Error>;
}
