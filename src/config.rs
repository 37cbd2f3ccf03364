use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_days: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let session = SessionConfig {
            ttl_days: parse_ttl_days(std::env::var("SESSION_TTL_DAYS").ok().as_deref())
                .context("invalid SESSION_TTL_DAYS")?,
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        Ok(Self {
            database_url,
            db_max_connections,
            session,
        })
    }
}

/// Session lifetime in days: unset means the default, otherwise 1..=3650.
fn parse_ttl_days(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_SESSION_TTL_DAYS);
    };
    let days = raw
        .parse::<i64>()
        .with_context(|| format!("{raw:?} is not a number of days"))?;
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_DAYS).contains(&days),
        "{days} is outside 1..={MAX_SESSION_TTL_DAYS}"
    );
    Ok(days)
}
