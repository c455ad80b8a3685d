//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) connection and schema setup.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "stockbook";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path and apply schema
    /// definitions.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }

    /// Idempotent schema setup. The unique SKU index backs product identity;
    /// the reorder indexes back the trigger scan and the list filters.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            "DEFINE INDEX IF NOT EXISTS product_sku ON TABLE product COLUMNS sku UNIQUE; \
             DEFINE INDEX IF NOT EXISTS reorder_product ON TABLE reorder COLUMNS product; \
             DEFINE INDEX IF NOT EXISTS reorder_status ON TABLE reorder COLUMNS status; \
             DEFINE INDEX IF NOT EXISTS reorder_created_at ON TABLE reorder COLUMNS created_at;",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
