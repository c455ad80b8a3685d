//! Type conversions
//!
//! Storage models (db::models, Thing ids) to API response models
//! (shared::models, "table:id" string ids).

use crate::db::models as db;
use crate::db::repository::reorder::RecentOpenRow;
use shared::models as api;

// ============ Helpers ============

pub fn thing_to_string(thing: &surrealdb::sql::Thing) -> String {
    thing.to_string()
}

pub fn option_thing_to_string(thing: &Option<surrealdb::sql::Thing>) -> Option<String> {
    thing.as_ref().map(thing_to_string)
}

// ============ Product ============

impl From<db::Product> for api::Product {
    fn from(p: db::Product) -> Self {
        Self {
            id: option_thing_to_string(&p.id),
            sku: p.sku,
            name: p.name,
            category: p.category,
            price: p.price,
            quantity: p.quantity,
            auto_reorder_enabled: p.auto_reorder_enabled,
            reorder_point: p.reorder_point,
            reorder_quantity: p.reorder_quantity,
            supplier_info: p.supplier_info,
            last_reorder_date: p.last_reorder_date,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ============ Reorder ============

impl From<db::Reorder> for api::Reorder {
    fn from(r: db::Reorder) -> Self {
        Self {
            id: option_thing_to_string(&r.id),
            product: thing_to_string(&r.product),
            product_name: None,
            product_sku: None,
            quantity: r.quantity,
            status: r.status,
            trigger_reason: r.trigger_reason,
            supplier_info: r.supplier_info,
            estimated_delivery: r.estimated_delivery,
            actual_delivery: r.actual_delivery,
            cost: r.cost,
            notes: r.notes,
            created_by: r.created_by,
            created_at: r.created_at,
        }
    }
}

/// Reorder response with the product summary filled in, for the operations
/// that return a single reorder
pub fn reorder_with_product(reorder: db::Reorder, product: Option<&db::Product>) -> api::Reorder {
    let mut out = api::Reorder::from(reorder);
    if let Some(p) = product {
        out.product_name = Some(p.name.clone());
        out.product_sku = Some(p.sku.clone());
    }
    out
}

impl From<RecentOpenRow> for api::ReorderSummary {
    fn from(row: RecentOpenRow) -> Self {
        Self {
            id: thing_to_string(&row.id),
            product_name: row.product_name.unwrap_or_default(),
            product_sku: row.product_sku.unwrap_or_default(),
            quantity: row.quantity,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

// ============ Order ============

impl From<db::OrderItem> for api::OrderItem {
    fn from(i: db::OrderItem) -> Self {
        Self {
            product: thing_to_string(&i.product),
            name: i.name,
            unit_price: i.unit_price,
            quantity: i.quantity,
        }
    }
}

impl From<db::Order> for api::Order {
    fn from(o: db::Order) -> Self {
        Self {
            id: option_thing_to_string(&o.id),
            items: o.items.into_iter().map(Into::into).collect(),
            total: o.total,
            customer_name: o.customer_name,
            created_by: o.created_by,
            created_at: o.created_at,
        }
    }
}
