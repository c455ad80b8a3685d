//! Reorder Repository
//!
//! Owns the reorder table plus the `reorder_guard` table that closes the
//! check-then-insert race for engine-created reorders: the guard's record id
//! is the product key, so two concurrent trigger scans cannot both insert —
//! the loser gets a Duplicate error and treats the shortage as already
//! handled.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::ReorderStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Reorder, ReorderStatusCounts};
use crate::utils::time::now_millis;

pub const REORDER_TABLE: &str = "reorder";
pub const GUARD_TABLE: &str = "reorder_guard";

/// Filters for the paginated reorder listing. Date bounds are inclusive
/// Unix millis on created_at.
#[derive(Debug, Clone, Default)]
pub struct ReorderListFilter {
    pub status: Option<ReorderStatus>,
    pub product: Option<Thing>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
    /// 1-based
    pub page: u32,
    pub limit: u32,
}

/// Row shape for the stats "recent open reorders" query
#[derive(Debug, Clone, Deserialize)]
pub struct RecentOpenRow {
    pub id: Thing,
    pub quantity: i64,
    pub status: ReorderStatus,
    pub created_at: i64,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Clone)]
pub struct ReorderRepository {
    base: BaseRepository,
}

impl ReorderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reorder>> {
        let pure_id = strip_table_prefix(REORDER_TABLE, id);
        let reorder: Option<Reorder> = self.base.db().select((REORDER_TABLE, pure_id)).await?;
        Ok(reorder)
    }

    /// Count open (pending/ordered) reorders referencing a product, manual
    /// ones included — any open reorder suppresses the auto trigger.
    pub async fn count_open_for_product(&self, product: &Thing) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS count FROM reorder \
                 WHERE product = $product AND status IN ['pending', 'ordered'] \
                 GROUP ALL",
            )
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Transactionally create an engine-triggered reorder together with its
    /// guard record, and stamp the product's last_reorder_date. A guard
    /// collision rolls the whole transaction back and surfaces as
    /// [`RepoError::Duplicate`].
    pub async fn create_guarded(&self, reorder: Reorder) -> RepoResult<Reorder> {
        let product = reorder.product.clone();
        let product_key = product.id.to_raw();
        let reorder_key = Uuid::new_v4().simple().to_string();
        let now = now_millis();

        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::thing($guard_table, $product_key) \
                     CONTENT { product: $product, reorder: type::thing($reorder_table, $reorder_key) }; \
                 CREATE type::thing($reorder_table, $reorder_key) CONTENT $data; \
                 UPDATE $product SET last_reorder_date = $now, updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("guard_table", GUARD_TABLE))
            .bind(("reorder_table", REORDER_TABLE))
            .bind(("product_key", product_key))
            .bind(("reorder_key", reorder_key))
            .bind(("product", product))
            .bind(("data", reorder))
            .bind(("now", now))
            .await?
            .check()?;

        let created: Vec<Reorder> = response.take(1)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create reorder".to_string()))
    }

    /// Create a manual reorder: no guard record, so it deliberately bypasses
    /// the one-open-reorder suppression. Still stamps last_reorder_date.
    pub async fn create_manual(&self, reorder: Reorder) -> RepoResult<Reorder> {
        let product = reorder.product.clone();
        let now = now_millis();

        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE reorder CONTENT $data; \
                 UPDATE $product SET last_reorder_date = $now, updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("product", product))
            .bind(("data", reorder))
            .bind(("now", now))
            .await?
            .check()?;

        let created: Vec<Reorder> = response.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create reorder".to_string()))
    }

    /// Apply a status transition. The caller's state-machine check runs on a
    /// read that may be stale by write time, so the transaction re-checks the
    /// current status and aborts if it already moved on. This keeps the
    /// `received` stock increment exactly-once under concurrent requests. For
    /// `received`, the product stock increment happens in the same transaction
    /// as the status change, and terminal transitions drop the guard record so
    /// a later shortage can trigger again.
    pub async fn update_status(
        &self,
        reorder_id: &Thing,
        product: &Thing,
        quantity: i64,
        new_status: ReorderStatus,
        cost: Option<Decimal>,
        notes: Option<String>,
    ) -> RepoResult<Reorder> {
        let now = now_millis();

        let allowed_from: Vec<String> = [
            ReorderStatus::Pending,
            ReorderStatus::Ordered,
            ReorderStatus::Received,
            ReorderStatus::Cancelled,
        ]
        .iter()
        .filter(|s| s.can_transition_to(new_status))
        .map(|s| s.as_str().to_string())
        .collect();

        let mut set_parts = vec!["status = $status"];
        if cost.is_some() {
            set_parts.push("cost = $cost");
        }
        if notes.is_some() {
            set_parts.push("notes = $notes");
        }
        if new_status == ReorderStatus::Received {
            set_parts.push("actual_delivery = $now");
        }

        let mut statements = vec![
            "IF $reorder.status NOT IN $allowed_from { THROW 'reorder already transitioned' };"
                .to_string(),
            format!("UPDATE $reorder SET {} RETURN AFTER;", set_parts.join(", ")),
        ];
        if new_status == ReorderStatus::Received {
            statements
                .push("UPDATE $product SET quantity += $quantity, updated_at = $now;".to_string());
        }
        if new_status.is_terminal() {
            statements.push("DELETE reorder_guard WHERE reorder = $reorder;".to_string());
        }

        let query_str = format!(
            "BEGIN TRANSACTION; {} COMMIT TRANSACTION;",
            statements.join(" ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("reorder", reorder_id.clone()))
            .bind(("product", product.clone()))
            .bind(("quantity", quantity))
            .bind(("status", new_status.as_str()))
            .bind(("allowed_from", allowed_from))
            .bind(("now", now));

        if let Some(v) = cost {
            query = query.bind(("cost", super::money_bind(v)?));
        }
        if let Some(v) = notes {
            query = query.bind(("notes", v));
        }

        let result = query.await?.check();
        let mut response = match result {
            Ok(r) => r,
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("already transitioned") {
                    return Err(RepoError::Validation(format!(
                        "Reorder {reorder_id} already transitioned"
                    )));
                }
                return Err(e.into());
            }
        };

        let updated: Vec<Reorder> = response.take(1)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Reorder {} not found", reorder_id)))
    }

    /// Paginated listing with optional status / product / date-range filters.
    /// Returns the page plus the total count of matching records.
    pub async fn list(&self, filter: &ReorderListFilter) -> RepoResult<(Vec<Reorder>, u64)> {
        let mut where_parts: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            where_parts.push("status = $status");
        }
        if filter.product.is_some() {
            where_parts.push("product = $product");
        }
        if filter.date_from.is_some() {
            where_parts.push("created_at >= $date_from");
        }
        if filter.date_to.is_some() {
            where_parts.push("created_at <= $date_to");
        }

        let where_clause = if where_parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_parts.join(" AND "))
        };

        let limit = filter.limit.max(1) as i64;
        let start = (filter.page.max(1) as i64 - 1) * limit;

        let query_str = format!(
            "SELECT * FROM reorder{where_clause} ORDER BY created_at DESC LIMIT $limit START $start; \
             SELECT count() AS count FROM reorder{where_clause} GROUP ALL;"
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("limit", limit))
            .bind(("start", start));

        if let Some(status) = filter.status {
            query = query.bind(("status", status.as_str()));
        }
        if let Some(product) = filter.product.clone() {
            query = query.bind(("product", product));
        }
        if let Some(from) = filter.date_from {
            query = query.bind(("date_from", from));
        }
        if let Some(to) = filter.date_to {
            query = query.bind(("date_to", to));
        }

        let mut response = query.await?;
        let reorders: Vec<Reorder> = response.take(0)?;
        let counts: Vec<CountRow> = response.take(1)?;
        let total = counts.first().map(|r| r.count).unwrap_or(0);

        Ok((reorders, total))
    }

    /// Counts grouped by status
    pub async fn counts_by_status(&self) -> RepoResult<Vec<ReorderStatusCounts>> {
        let rows: Vec<ReorderStatusCounts> = self
            .base
            .db()
            .query("SELECT status, count() AS count FROM reorder GROUP BY status")
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Most recent open reorders with the referenced product's name and sku
    pub async fn recent_open(&self, limit: u32) -> RepoResult<Vec<RecentOpenRow>> {
        let rows: Vec<RecentOpenRow> = self
            .base
            .db()
            .query(
                "SELECT id, quantity, status, created_at, \
                        product.name AS product_name, product.sku AS product_sku \
                 FROM reorder \
                 WHERE status IN ['pending', 'ordered'] \
                 ORDER BY created_at DESC \
                 LIMIT $limit",
            )
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
