//! Order API Handlers
//!
//! Order creation decrements stock and then kicks off the auto-reorder
//! trigger scan in a detached task: a trigger failure must never fail the
//! order that caused it.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::AppResponse;
use shared::models as api;

use crate::actor::Actor;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderItem};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_positive_quantity};
use crate::utils::{AppError, AppResult, ok};

const RECENT_ORDERS_LIMIT: u32 = 100;

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<api::Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_recent(RECENT_ORDERS_LIMIT).await?;
    Ok(ok(orders.into_iter().map(api::Order::from).collect()))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<api::Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(ok(order.into()))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<api::Order>>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("order must contain at least one item"));
    }
    validate_optional_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;

    let products = ProductRepository::new(state.db.clone());

    // Resolve lines, snapshotting name and price at sale time
    let mut items = Vec::with_capacity(payload.items.len());
    let mut total = Decimal::ZERO;
    for line in &payload.items {
        validate_positive_quantity(line.quantity, "item quantity")?;
        let product = products
            .find_by_id(&line.product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", line.product_id)))?;
        let product_id = product
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Product record without id"))?;

        total += product.price * Decimal::from(line.quantity);
        items.push(OrderItem {
            product: product_id,
            name: product.name,
            unit_price: product.price,
            quantity: line.quantity,
        });
    }

    let order = Order {
        id: None,
        items,
        total,
        customer_name: payload.customer_name,
        created_by: actor.id.clone(),
        created_at: now_millis(),
    };

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(order).await?;

    // Fire-and-forget: sale may have pushed products below their reorder point
    let engine = state.reorder_engine.clone();
    let actor_id = actor.id;
    tokio::spawn(async move {
        if let Err(e) = engine.check_auto_reorder_triggers(&actor_id).await {
            tracing::warn!(error = %e, "Post-order reorder trigger check failed");
        }
    });

    Ok(ok(order.into()))
}
