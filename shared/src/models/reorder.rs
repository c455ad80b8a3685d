use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ReorderStatus, SupplierInfo, TriggerReason};

/// Reorder as served over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reorder {
    pub id: Option<String>,
    /// Referenced product id
    pub product: String,
    /// Product name at the time the API response was built
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_sku: Option<String>,
    pub quantity: i64,
    pub status: ReorderStatus,
    pub trigger_reason: TriggerReason,
    pub supplier_info: Option<SupplierInfo>,
    /// Unix millis
    pub estimated_delivery: i64,
    pub actual_delivery: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: i64,
}

/// One line of the stats "recent open reorders" list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSummary {
    pub id: String,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i64,
    pub status: ReorderStatus,
    pub created_at: i64,
}

/// Aggregate reorder counts by status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderStats {
    pub total_reorders: u64,
    pub pending: u64,
    pub ordered: u64,
    pub received: u64,
    pub cancelled: u64,
    pub recent: Vec<ReorderSummary>,
}
