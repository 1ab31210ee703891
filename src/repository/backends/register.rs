use std::sync::Arc;
use serde::Deserialize;

use super::sql::{DatabaseConfig, PostgresBackend, SqliteBackend};
use crate::repository::ImageRepository;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "config")]
pub enum DatabaseConfigs {
    Postgres(DatabaseConfig),
    Sqlite(DatabaseConfig),
}

impl DatabaseConfigs {
    pub async fn connect(&self) -> anyhow::Result<Arc<dyn ImageRepository>> {
        match self {
            Self::Postgres(cfg) => {
                let backend = PostgresBackend::connect(cfg.clone()).await?;
                Ok(Arc::new(backend))
            },
            Self::Sqlite(cfg) => {
                let backend = SqliteBackend::connect(cfg.clone()).await?;
                Ok(Arc::new(backend))
            },
        }
    }
}
