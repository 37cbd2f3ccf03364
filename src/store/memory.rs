use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::Store;
use crate::{
    auth::repo_types::{NewUser, Session, User},
    users::repo_types::{CareerUpdate, OrientationSelections, PreferenceSelections},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: HashMap<String, Session>,
    preferences: HashMap<i64, PreferenceSelections>,
    orientation: HashMap<i64, OrientationSelections>,
}

/// In-process `Store` for handler tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn sessions_for(&self, user_id: i64) -> Vec<Session> {
        self.tables
            .lock()
            .unwrap()
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn preference_rows(&self) -> Vec<(i64, PreferenceSelections)> {
        let tables = self.tables.lock().unwrap();
        tables
            .preferences
            .iter()
            .map(|(id, p)| (*id, p.clone()))
            .collect()
    }

    pub fn orientation_rows(&self) -> Vec<(i64, OrientationSelections)> {
        let tables = self.tables.lock().unwrap();
        tables
            .orientation
            .iter()
            .map(|(id, o)| (*id, o.clone()))
            .collect()
    }

    fn with_user<F>(&self, user_id: i64, f: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        let mut tables = self.tables.lock().unwrap();
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        }
    }

    fn has_user(tables: &Tables, user_id: i64) -> bool {
        tables.users.iter().any(|u| u.id == user_id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<Option<i64>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let id = tables.users.len() as i64 + 1;
        tables.users.push(User {
            id,
            name: user.name.clone(),
            address: user.address.clone(),
            birth_date: user.birth_date,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            last_company: None,
            job_type: None,
            job_type_detail: None,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(Some(id))
    }

    async fn create_session(&self, session: &Session) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_session_user(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let user = tables
            .sessions
            .get(token)
            .filter(|s| s.expires_at > now)
            .and_then(|s| tables.users.iter().find(|u| u.id == s.user_id))
            .cloned();
        Ok(user)
    }

    async fn update_last_company(
        &self,
        user_id: i64,
        last_company: &str,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.with_user(user_id, |u| {
            u.last_company = Some(last_company.to_string())
        }))
    }

    async fn update_job_type(
        &self,
        user_id: i64,
        job_type: &str,
        job_type_detail: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.with_user(user_id, |u| {
            u.job_type = Some(job_type.to_string());
            u.job_type_detail = job_type_detail.map(str::to_string);
        }))
    }

    async fn update_job_type_detail(
        &self,
        user_id: i64,
        job_type_detail: &str,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.with_user(user_id, |u| {
            u.job_type_detail = Some(job_type_detail.to_string())
        }))
    }

    async fn update_career(
        &self,
        user_id: i64,
        update: &CareerUpdate,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.with_user(user_id, |u| {
            u.last_company = update.last_company.clone();
            u.job_type = update.job_type.clone();
            u.job_type_detail = update.job_type_detail.clone();
        }))
    }

    async fn upsert_preferences(
        &self,
        user_id: i64,
        prefs: &PreferenceSelections,
    ) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        if !Self::has_user(&tables, user_id) {
            return Ok(false);
        }
        tables.preferences.insert(user_id, prefs.clone());
        Ok(true)
    }

    async fn upsert_orientation(
        &self,
        user_id: i64,
        orientation: &OrientationSelections,
    ) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        if !Self::has_user(&tables, user_id) {
            return Ok(false);
        }
        tables.orientation.insert(user_id, orientation.clone());
        Ok(true)
    }
}
