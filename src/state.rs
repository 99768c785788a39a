use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::generation::{self, CompletionClient};
use crate::store::{PgStore, PlanStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlanStore>,
    pub config: Arc<AppConfig>,
    pub generator: Arc<dyn CompletionClient>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let generator = generation::build_client(&config.generation);
        let store = Arc::new(PgStore::new(db)) as Arc<dyn PlanStore>;

        Ok(Self::from_parts(store, config, generator))
    }

    pub fn from_parts(
        store: Arc<dyn PlanStore>,
        config: Arc<AppConfig>,
        generator: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            store,
            config,
            generator,
        }
    }
}
