//! Repository Module
//!
//! CRUD and query operations over the embedded SurrealDB tables.

pub mod order;
pub mod product;
pub mod reorder;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use reorder::ReorderRepository;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index and record-id collisions surface as "already exists" /
        // "already contains" database errors
        if msg.contains("already exists") || msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Money columns are stored as floats; individual amount binds must match or
/// later reads fail to deserialize
pub(crate) fn money_bind(amount: Decimal) -> RepoResult<f64> {
    amount
        .to_f64()
        .ok_or_else(|| RepoError::Validation(format!("amount out of range: {amount}")))
}

/// Build a record id from a table name and a key that may or may not carry
/// the "table:" prefix already
pub fn make_thing(table: &str, id: &str) -> Thing {
    let key = strip_table_prefix(table, id);
    Thing::from((table.to_string(), key.to_string()))
}

/// Strip a leading "table:" prefix from an id string, unescaping the
/// angle-bracket form `Thing::to_string()` produces for non-alphanumeric keys
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    let key = id.strip_prefix(&format!("{table}:")).unwrap_or(id);
    key.strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .unwrap_or(key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_only_when_present() {
        assert_eq!(strip_table_prefix("product", "product:abc"), "abc");
        assert_eq!(strip_table_prefix("product", "abc"), "abc");
        assert_eq!(strip_table_prefix("product", "reorder:abc"), "reorder:abc");
    }

    #[test]
    fn unescapes_bracketed_keys() {
        assert_eq!(strip_table_prefix("product", "product:⟨abc-1⟩"), "abc-1");
        assert_eq!(strip_table_prefix("product", "⟨abc-1⟩"), "abc-1");
    }

    #[test]
    fn make_thing_is_idempotent_on_prefixed_ids() {
        let a = make_thing("product", "abc");
        let b = make_thing("product", "product:abc");
        assert_eq!(a, b);
    }
}
