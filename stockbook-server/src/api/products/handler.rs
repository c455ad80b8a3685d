//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::AppResponse;
use shared::models as api;

use crate::actor::Actor;
use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SKU_LEN, validate_non_negative, validate_non_negative_amount,
    validate_positive_quantity, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

fn validate_create(payload: &ProductCreate) -> AppResult<()> {
    validate_required_text(&payload.sku, "sku", MAX_SKU_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_non_negative_amount(payload.price, "price")?;
    if let Some(q) = payload.quantity {
        validate_non_negative(q, "quantity")?;
    }
    if let Some(p) = payload.reorder_point {
        validate_non_negative(p, "reorder_point")?;
    }
    if let Some(q) = payload.reorder_quantity {
        validate_positive_quantity(q, "reorder_quantity")?;
    }
    Ok(())
}

fn validate_update(payload: &ProductUpdate) -> AppResult<()> {
    if let Some(sku) = &payload.sku {
        validate_required_text(sku, "sku", MAX_SKU_LEN)?;
    }
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_non_negative_amount(price, "price")?;
    }
    if let Some(q) = payload.quantity {
        validate_non_negative(q, "quantity")?;
    }
    if let Some(p) = payload.reorder_point {
        validate_non_negative(p, "reorder_point")?;
    }
    if let Some(q) = payload.reorder_quantity {
        validate_positive_quantity(q, "reorder_quantity")?;
    }
    Ok(())
}

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<api::Product>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await?;
    Ok(ok(products.into_iter().map(api::Product::from).collect()))
}

/// GET /api/products/low-stock
pub async fn list_low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<api::Product>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_low_stock().await?;
    Ok(ok(products.into_iter().map(api::Product::from).collect()))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<api::Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    Ok(ok(product.into()))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    _actor: Actor,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<api::Product>>> {
    validate_create(&payload)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok(ok(product.into()))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    _actor: Actor,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<api::Product>>> {
    validate_update(&payload)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(ok(product.into()))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    actor.require_procurement()?;

    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok(true))
}
