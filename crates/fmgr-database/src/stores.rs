//! Backend selection: one bundle of store handles shared by all services.

use std::sync::Arc;

use tracing::info;

use fmgr_core::config::{DatabaseConfig, StoreBackend};
use fmgr_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    FileRepository, FolderRepository, ModificationRepository, UserRepository,
};
use crate::store::{FileStore, FolderStore, ModificationStore, UserStore};

/// Handles to every store, all backed by the same backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User rows.
    pub users: Arc<dyn UserStore>,
    /// Folder rows.
    pub folders: Arc<dyn FolderStore>,
    /// File rows.
    pub files: Arc<dyn FileStore>,
    /// Folder modification histories.
    pub modifications: Arc<dyn ModificationStore>,
    backend: StoreBackend,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the backend named in the configuration, running migrations for
    /// PostgreSQL when enabled.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            StoreBackend::Memory => {
                info!("Using in-memory store; data will not survive a restart");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by PostgreSQL repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            folders: Arc::new(FolderRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            modifications: Arc::new(ModificationRepository::new(pg)),
            backend: StoreBackend::Postgres,
            pool: Some(pool),
        }
    }

    /// Stores backed by one shared [`MemoryStore`].
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            folders: Arc::new(store.clone()),
            files: Arc::new(store.clone()),
            modifications: Arc::new(store),
            backend: StoreBackend::Memory,
            pool: None,
        }
    }

    /// Which backend these stores use.
    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    /// Whether the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
