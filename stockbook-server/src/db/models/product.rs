//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::SupplierInfo;
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Stored as a float so SurrealQL aggregates (`math::sum`) work on it
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub auto_reorder_enabled: bool,
    /// Stock level at or below which the trigger engine fires
    #[serde(default = "default_reorder_point")]
    pub reorder_point: i64,
    /// Units requested per triggered reorder
    #[serde(default = "default_reorder_quantity")]
    pub reorder_quantity: i64,
    pub supplier_info: Option<SupplierInfo>,
    /// Unix millis, set by the engine whenever it creates a reorder
    pub last_reorder_date: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_reorder_point() -> i64 {
    5
}

fn default_reorder_quantity() -> i64 {
    20
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Shortage condition: boundary inclusive (`quantity <= reorder_point`)
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_point
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: Option<i64>,
    pub auto_reorder_enabled: Option<bool>,
    pub reorder_point: Option<i64>,
    pub reorder_quantity: Option<i64>,
    pub supplier_info: Option<SupplierInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub auto_reorder_enabled: Option<bool>,
    pub reorder_point: Option<i64>,
    pub reorder_quantity: Option<i64>,
    pub supplier_info: Option<SupplierInfo>,
    pub is_active: Option<bool>,
}
