//! Reorder Trigger Engine
//!
//! Scans products flagged for auto-reorder, compares stock to the per-product
//! reorder point, and creates at most one open reorder per undischarged
//! shortage. Holds no state of its own — everything lives in the store.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::{ReorderStatus, TriggerReason};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Product, Reorder};
use crate::db::repository::{
    ProductRepository, ReorderRepository, RepoError,
    reorder::{RecentOpenRow, ReorderListFilter},
};
use crate::procurement::notifier::SupplierNotifier;
use crate::utils::time::{millis_days_from_now, now_millis};
use crate::utils::{AppError, AppResult};

/// Lead time assumed for estimated_delivery
const DELIVERY_LEAD_DAYS: i64 = 7;

/// Result of a trigger scan
#[derive(Debug)]
pub struct TriggerOutcome {
    pub reorders_created: usize,
    pub reorders: Vec<Reorder>,
}

pub struct ReorderEngine {
    products: ProductRepository,
    reorders: ReorderRepository,
    notifier: Arc<dyn SupplierNotifier>,
}

impl ReorderEngine {
    pub fn new(db: Surreal<Db>, notifier: Arc<dyn SupplierNotifier>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            reorders: ReorderRepository::new(db),
            notifier,
        }
    }

    /// Full-catalog trigger scan.
    ///
    /// For each product in the shortage set: skip if any open reorder exists
    /// (idempotent suppression), otherwise create one transactionally. A
    /// notification failure never aborts the scan; a store failure does, but
    /// reorders already created stay committed and a re-run is safe.
    pub async fn check_auto_reorder_triggers(&self, actor: &str) -> AppResult<TriggerOutcome> {
        let shortages = self.products.find_shortages().await?;
        tracing::debug!(count = shortages.len(), "Auto-reorder shortage scan");

        let mut created = Vec::new();
        for product in shortages {
            let Some(product_id) = product.id.clone() else {
                continue;
            };

            // Any open reorder (manual included) suppresses the trigger
            if self.reorders.count_open_for_product(&product_id).await? > 0 {
                tracing::debug!(sku = %product.sku, "Open reorder exists, skipping");
                continue;
            }

            let reorder = build_reorder(
                product_id,
                &product,
                product.reorder_quantity,
                TriggerReason::LowStock,
                actor,
                None,
            );

            match self.reorders.create_guarded(reorder).await {
                Ok(reorder) => {
                    tracing::info!(
                        sku = %product.sku,
                        quantity = reorder.quantity,
                        stock = product.quantity,
                        reorder_point = product.reorder_point,
                        "Auto-reorder triggered"
                    );
                    self.notify_best_effort(&product, &reorder).await;
                    created.push(reorder);
                }
                // Lost the race against a concurrent scan: already handled
                Err(RepoError::Duplicate(_)) => {
                    tracing::debug!(sku = %product.sku, "Reorder guard exists, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(TriggerOutcome {
            reorders_created: created.len(),
            reorders: created,
        })
    }

    /// Operator-initiated reorder. Deliberately skips the suppression check:
    /// operator intent overrides automatic dedup.
    pub async fn create_manual_reorder(
        &self,
        product_id: &str,
        quantity: i64,
        actor: &str,
        notes: Option<String>,
    ) -> AppResult<Reorder> {
        if quantity < 1 {
            return Err(AppError::validation(format!(
                "quantity must be at least 1 (got {quantity})"
            )));
        }

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))?;
        let id = product
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Product record without id"))?;

        let reorder = build_reorder(id, &product, quantity, TriggerReason::Manual, actor, notes);
        let reorder = self.reorders.create_manual(reorder).await?;

        tracing::info!(sku = %product.sku, quantity, actor, "Manual reorder created");
        Ok(reorder)
    }

    /// Apply a status transition, enforcing the forward-only state machine.
    /// A transition into `received` replenishes the product's stock in the
    /// same store transaction as the status write.
    pub async fn update_reorder_status(
        &self,
        reorder_id: &str,
        new_status: ReorderStatus,
        cost: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<Reorder> {
        if let Some(c) = cost
            && c < Decimal::ZERO
        {
            return Err(AppError::validation(format!(
                "cost must not be negative (got {c})"
            )));
        }

        let reorder = self
            .reorders
            .find_by_id(reorder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reorder {reorder_id} not found")))?;

        if !reorder.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition(format!(
                "{} -> {}",
                reorder.status, new_status
            )));
        }

        let id = reorder
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Reorder record without id"))?;

        let updated = self
            .reorders
            .update_status(
                &id,
                &reorder.product,
                reorder.quantity,
                new_status,
                cost,
                notes,
            )
            .await?;

        tracing::info!(
            reorder = %id,
            from = %reorder.status,
            to = %new_status,
            "Reorder status updated"
        );
        Ok(updated)
    }

    /// Counts by status plus the most recent open reorders. Pure query.
    pub async fn reorder_stats(&self, recent_limit: u32) -> AppResult<ReorderStatsRaw> {
        let counts = self.reorders.counts_by_status().await?;
        let recent = self.reorders.recent_open(recent_limit).await?;

        let mut stats = ReorderStatsRaw {
            recent,
            ..Default::default()
        };
        for row in counts {
            stats.total += row.count;
            match row.status {
                ReorderStatus::Pending => stats.pending = row.count,
                ReorderStatus::Ordered => stats.ordered = row.count,
                ReorderStatus::Received => stats.received = row.count,
                ReorderStatus::Cancelled => stats.cancelled = row.count,
            }
        }
        Ok(stats)
    }

    /// Paginated listing. Pure query.
    pub async fn list_reorders(&self, filter: &ReorderListFilter) -> AppResult<(Vec<Reorder>, u64)> {
        Ok(self.reorders.list(filter).await?)
    }

    async fn notify_best_effort(&self, product: &Product, reorder: &Reorder) {
        let has_email = product
            .supplier_info
            .as_ref()
            .is_some_and(|s| s.email.is_some());
        if !has_email {
            return;
        }

        if let Err(e) = self.notifier.notify_supplier(product, reorder).await {
            tracing::warn!(
                sku = %product.sku,
                error = %e,
                "Supplier notification failed (reorder stands)"
            );
        }
    }
}

/// Aggregate counts with raw recent rows; the API layer converts to the wire
/// model.
#[derive(Debug, Default)]
pub struct ReorderStatsRaw {
    pub total: u64,
    pub pending: u64,
    pub ordered: u64,
    pub received: u64,
    pub cancelled: u64,
    pub recent: Vec<RecentOpenRow>,
}

fn build_reorder(
    product_id: surrealdb::sql::Thing,
    product: &Product,
    quantity: i64,
    reason: TriggerReason,
    actor: &str,
    notes: Option<String>,
) -> Reorder {
    Reorder {
        id: None,
        product: product_id,
        quantity,
        status: ReorderStatus::Pending,
        trigger_reason: reason,
        supplier_info: product.supplier_info.clone(),
        estimated_delivery: millis_days_from_now(DELIVERY_LEAD_DAYS),
        actual_delivery: None,
        cost: None,
        notes,
        created_by: actor.to_string(),
        created_at: now_millis(),
    }
}
