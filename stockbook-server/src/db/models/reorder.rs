//! Reorder Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{ReorderStatus, SupplierInfo, TriggerReason};
use surrealdb::sql::Thing;

pub type ReorderId = Thing;

/// Reorder record
///
/// `supplier_info` is a snapshot copied from the product at creation time,
/// not a live link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reorder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReorderId>,
    /// Record link to product
    pub product: Thing,
    pub quantity: i64,
    pub status: ReorderStatus,
    pub trigger_reason: TriggerReason,
    pub supplier_info: Option<SupplierInfo>,
    /// Unix millis, creation time + 7 days
    pub estimated_delivery: i64,
    /// Unix millis, set when status transitions to received
    pub actual_delivery: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    /// Actor the creation is attributed to
    pub created_by: String,
    pub created_at: i64,
}

/// Guard record closing the check-then-insert race for engine-created
/// reorders. Record id = product key, so a second concurrent insert for the
/// same product fails on record-id uniqueness and the engine treats that as
/// "already triggered".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderGuard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub product: Thing,
    pub reorder: Thing,
}

/// Row shape for the stats GROUP BY status query
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderStatusCounts {
    pub status: ReorderStatus,
    pub count: u64,
}
