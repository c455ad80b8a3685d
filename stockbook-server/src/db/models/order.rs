//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type OrderId = Thing;

/// One order line with name and price snapshotted at sale time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Record link to product
    pub product: Thing,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i64,
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub items: Vec<OrderItem>,
    /// Stored as a float so `math::sum(total)` yields revenue directly
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub customer_name: Option<String>,
    pub created_by: String,
    pub created_at: i64,
}

/// Request body for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemCreate {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderItemCreate>,
    pub customer_name: Option<String>,
}
