//! Shared application state: one service per entity plus the alert header scheme.

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{Demo, Demo1, Demo2, Demo3, Entity};
use crate::error::AppError;
use crate::migration::{ensure_database_exists, ensure_entity_tables};
use crate::response::Alerts;
use crate::service::CrudService;
use crate::store::{MemoryRepository, PgRepository, Repository};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

/// The store behind every repository.
#[derive(Clone)]
pub enum Backend {
    Postgres(PgPool),
    Memory,
}

impl Backend {
    fn repository<E: Entity>(&self) -> Arc<dyn Repository<E>> {
        match self {
            Backend::Postgres(pool) => Arc::new(PgRepository::<E>::new(pool.clone())),
            Backend::Memory => Arc::new(MemoryRepository::<E>::new()),
        }
    }

    pub fn kind(&self) -> StorageBackend {
        match self {
            Backend::Postgres(_) => StorageBackend::Postgres,
            Backend::Memory => StorageBackend::Memory,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub alerts: Arc<Alerts>,
    pub storage: StorageBackend,
    pub demo: CrudService<Demo>,
    pub demo1: CrudService<Demo1>,
    pub demo2: CrudService<Demo2>,
    pub demo3: CrudService<Demo3>,
}

impl AppState {
    pub fn new(backend: &Backend, alerts: Alerts) -> Self {
        AppState {
            alerts: Arc::new(alerts),
            storage: backend.kind(),
            demo: CrudService::new(backend.repository()),
            demo1: CrudService::new(backend.repository()),
            demo2: CrudService::new(backend.repository()),
            demo3: CrudService::new(backend.repository()),
        }
    }

    /// Memory-backed state, as used by `storage.backend = "memory"`.
    pub fn in_memory(alerts: Alerts) -> Self {
        Self::new(&Backend::Memory, alerts)
    }

    /// Connect the configured backend. For PostgreSQL this creates the database and
    /// tables when missing.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let alerts = Alerts::new(&config.app.name)?;
        let backend = match config.storage.backend {
            StorageBackend::Memory => Backend::Memory,
            StorageBackend::Postgres => {
                let database_url = config.database_url();
                ensure_database_exists(&database_url).await?;
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&database_url)
                    .await?;
                ensure_entity_tables(&pool).await?;
                Backend::Postgres(pool)
            }
        };
        Ok(Self::new(&backend, alerts))
    }

    /// All four entities share one store, so checking one checks them all.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.demo.ping().await
    }
}
