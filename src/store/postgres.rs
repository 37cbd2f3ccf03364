use async_trait::async_trait;
use sqlx::{postgres::PgQueryResult, PgPool};
use time::OffsetDateTime;
use tracing::debug;

use super::Store;
use crate::{
    auth::repo_types::{NewUser, Session, User},
    users::repo_types::{json_list, CareerUpdate, OrientationSelections, PreferenceSelections},
};

/// `Store` backed by a Postgres pool. Every call checks out its own connection.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn touched(res: PgQueryResult) -> bool {
    res.rows_affected() > 0
}

/// A missing parent user shows up as a foreign-key violation on insert.
fn missing_user(res: Result<PgQueryResult, sqlx::Error>) -> Result<bool, sqlx::Error> {
    match res {
        Ok(r) => Ok(touched(r)),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Ok(false),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, birth_date, email, password_hash,
                   last_company, job_type, job_type_detail, created_at
              FROM users
             WHERE email = $1
             LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<Option<i64>, sqlx::Error> {
        // The unique email constraint settles concurrent registrations.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, address, birth_date, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.address)
        .bind(user.birth_date)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn create_session(&self, session: &Session) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        debug!(user_id = session.user_id, "session stored");
        Ok(())
    }

    async fn find_session_user(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.address, u.birth_date, u.email, u.password_hash,
                   u.last_company, u.job_type, u.job_type_detail, u.created_at
              FROM sessions s
              JOIN users u ON u.id = s.user_id
             WHERE s.token = $1 AND s.expires_at > $2
             LIMIT 1
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_last_company(
        &self,
        user_id: i64,
        last_company: &str,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("UPDATE users SET last_company = $1 WHERE id = $2")
            .bind(last_company)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(touched(res))
    }

    async fn update_job_type(
        &self,
        user_id: i64,
        job_type: &str,
        job_type_detail: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("UPDATE users SET job_type = $1, job_type_detail = $2 WHERE id = $3")
            .bind(job_type)
            .bind(job_type_detail)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(touched(res))
    }

    async fn update_job_type_detail(
        &self,
        user_id: i64,
        job_type_detail: &str,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("UPDATE users SET job_type_detail = $1 WHERE id = $2")
            .bind(job_type_detail)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(touched(res))
    }

    async fn update_career(
        &self,
        user_id: i64,
        update: &CareerUpdate,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET last_company = $1,
                   job_type = $2,
                   job_type_detail = $3
             WHERE id = $4
            "#,
        )
        .bind(&update.last_company)
        .bind(&update.job_type)
        .bind(&update.job_type_detail)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(touched(res))
    }

    async fn upsert_preferences(
        &self,
        user_id: i64,
        prefs: &PreferenceSelections,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, atmosphere, age_group, work_style)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
               SET atmosphere = EXCLUDED.atmosphere,
                   age_group = EXCLUDED.age_group,
                   work_style = EXCLUDED.work_style,
                   updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(json_list(&prefs.atmosphere))
        .bind(json_list(&prefs.age_group))
        .bind(json_list(&prefs.work_style))
        .execute(&self.pool)
        .await;
        missing_user(res)
    }

    async fn upsert_orientation(
        &self,
        user_id: i64,
        orientation: &OrientationSelections,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            r#"
            INSERT INTO user_orientation
                   (user_id, work_purpose, ideal_role, contribute, personal_values)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
               SET work_purpose = EXCLUDED.work_purpose,
                   ideal_role = EXCLUDED.ideal_role,
                   contribute = EXCLUDED.contribute,
                   personal_values = EXCLUDED.personal_values,
                   updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(json_list(&orientation.work_purpose))
        .bind(json_list(&orientation.ideal_role))
        .bind(json_list(&orientation.contribute))
        .bind(json_list(&orientation.personal_values))
        .execute(&self.pool)
        .await;
        missing_user(res)
    }
}
