//! Dashboard API Handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::AppResponse;

use crate::core::ServerState;
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::utils::{AppResult, ok};

/// Overview statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub product_count: usize,
    pub low_stock_count: usize,
    /// Sum of price * quantity over active products
    #[serde(with = "rust_decimal::serde::float")]
    pub inventory_value: Decimal,
    pub order_count: u64,
    pub revenue: f64,
    pub open_reorders: u64,
}

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AppResponse<DashboardStats>>> {
    let products = ProductRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());

    let catalog = products.find_all().await?;
    let low_stock_count = catalog.iter().filter(|p| p.is_low_stock()).count();
    let inventory_value: Decimal = catalog
        .iter()
        .map(|p| p.price * Decimal::from(p.quantity))
        .sum();

    let (order_count, revenue) = orders.count_and_revenue().await?;
    let reorder_stats = state.reorder_engine.reorder_stats(0).await?;

    Ok(ok(DashboardStats {
        product_count: catalog.len(),
        low_stock_count,
        inventory_value,
        order_count,
        revenue,
        open_reorders: reorder_stats.pending + reorder_stats.ordered,
    }))
}
