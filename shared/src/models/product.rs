use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::SupplierInfo;

/// Product as served over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<String>,
    pub sku: String,
    pub name: String,
    pub category: String,
    /// Money goes over the wire as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
    pub auto_reorder_enabled: bool,
    pub reorder_point: i64,
    pub reorder_quantity: i64,
    pub supplier_info: Option<SupplierInfo>,
    /// Unix millis of the last reorder the engine created for this product
    pub last_reorder_date: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
