use daybook_db::DbPool;

use crate::config::{AppConfig, StorageBackend};
use crate::documents::DocumentsService;
use crate::error::AppResult;
use crate::journal::JournalService;

/// Explicit application context: configuration plus the storage handle.
///
/// Services are cheap values built from the context; nothing is global.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
    pool: DbPool,
}

impl AppContext {
    /// Open the configured database, check it answers, and apply migrations.
    pub async fn connect(config: AppConfig) -> AppResult<Self> {
        match config.backend {
            StorageBackend::Sqlite => {}
        }

        let pool = daybook_db::create_pool(&config.database_url, config.max_connections).await?;
        tracing::debug!("Database connection pool created");

        daybook_db::health_check(&pool).await?;
        daybook_db::run_migrations(&pool).await?;
        tracing::debug!("Database migrations applied");

        Ok(Self { config, pool })
    }

    /// Wrap an already-migrated pool.
    pub fn from_pool(config: AppConfig, pool: DbPool) -> Self {
        Self { config, pool }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn documents(&self) -> DocumentsService {
        DocumentsService::new(self.pool.clone())
            .with_preview_chars(self.config.search_preview_chars)
    }

    pub fn journal(&self) -> JournalService {
        JournalService::new(self.pool.clone())
    }
}
