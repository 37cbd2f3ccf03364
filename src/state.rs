use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::db;
use crate::store::{PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;

        Ok(Self::from_parts(
            Arc::new(PgStore::new(pool)),
            config,
            Arc::new(SystemClock),
        ))
    }

    pub fn from_parts(
        store: Arc<dyn Store>,
        config: Arc<AppConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }
}
