//! Server state
//!
//! Shared handles for everything request handlers need. Cloning is cheap:
//! the database handle and engine are Arc-backed.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::procurement::{LogNotifier, ReorderEngine, SupplierNotifier};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Reorder trigger engine
    pub reorder_engine: Arc<ReorderEngine>,
}

impl ServerState {
    /// Build state around an existing database handle (tests use this with a
    /// temp-dir store).
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self::with_notifier(config, db, Arc::new(LogNotifier))
    }

    pub fn with_notifier(
        config: Config,
        db: Surreal<Db>,
        notifier: Arc<dyn SupplierNotifier>,
    ) -> Self {
        let reorder_engine = Arc::new(ReorderEngine::new(db.clone(), notifier));
        Self {
            config,
            db,
            reorder_engine,
        }
    }

    /// Initialize server state: work_dir layout, database, engine.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("stockbook.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }
}
