//! Order Repository
//!
//! The table is named `sales_order` because `order` collides with the
//! ORDER BY keyword in SurrealQL.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Order;
use crate::utils::time::now_millis;

pub const ORDER_TABLE: &str = "sales_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an order and decrement stock for each line in one transaction.
    /// Oversell aborts the whole transaction before any record is written.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let items = order.items.clone();
        let now = now_millis();

        let mut statements: Vec<String> = Vec::new();
        for i in 0..items.len() {
            statements.push(format!(
                "IF $p{i}.quantity < $q{i} {{ THROW 'insufficient stock for ' + $p{i}.name }};"
            ));
            statements.push(format!(
                "UPDATE $p{i} SET quantity -= $q{i}, updated_at = $now;"
            ));
        }
        statements.push("CREATE sales_order CONTENT $data;".to_string());
        let create_index = statements.len() - 1;

        let query_str = format!(
            "BEGIN TRANSACTION; {} COMMIT TRANSACTION;",
            statements.join(" ")
        );

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("data", order))
            .bind(("now", now));
        for (i, item) in items.into_iter().enumerate() {
            query = query
                .bind((format!("p{i}"), item.product))
                .bind((format!("q{i}"), item.quantity));
        }

        let result = query.await?.check();
        let mut response = match result {
            Ok(r) => r,
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("insufficient stock") {
                    return Err(RepoError::Validation(msg));
                }
                return Err(e.into());
            }
        };

        let created: Vec<Order> = response.take(create_index)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Most recent orders first
    pub async fn find_recent(&self, limit: u32) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM sales_order ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Order count and summed revenue, for the dashboard
    pub async fn count_and_revenue(&self) -> RepoResult<(u64, f64)> {
        #[derive(serde::Deserialize)]
        struct Row {
            count: u64,
            revenue: Option<f64>,
        }

        let rows: Vec<Row> = self
            .base
            .db()
            .query(
                "SELECT count() AS count, math::sum(total) AS revenue \
                 FROM sales_order GROUP ALL",
            )
            .await?
            .take(0)?;
        Ok(rows
            .first()
            .map(|r| (r.count, r.revenue.unwrap_or(0.0)))
            .unwrap_or((0, 0.0)))
    }
}
