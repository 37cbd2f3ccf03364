use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::AppConfig;

/// Opens the shared connection pool.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    info!(max_connections = config.db_max_connections, "connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Applies pending migrations; any failure is returned to the caller.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("run database migrations")?;
    info!("database migrations applied");
    Ok(())
}
