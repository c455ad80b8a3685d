//! Reorder API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models as api;
use shared::{AppResponse, PaginatedResponse, ReorderStatus};

use crate::actor::Actor;
use crate::api::convert::reorder_with_product;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::db::repository::make_thing;
use crate::db::repository::product::PRODUCT_TABLE;
use crate::db::repository::reorder::ReorderListFilter;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ok, time};

const DEFAULT_PAGE_LIMIT: u32 = 20;
const MAX_PAGE_LIMIT: u32 = 100;
const STATS_RECENT_LIMIT: u32 = 5;

// ============================================================================
// Query / body types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub product_id: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualReorderRequest {
    pub product_id: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReorderStatus,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Response for the trigger scan
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReport {
    pub reorders_created: usize,
    pub reorders: Vec<api::Reorder>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/reorders - paginated listing with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReorderListQuery>,
) -> AppResult<Json<AppResponse<PaginatedResponse<api::Reorder>>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);

    let status = query
        .status
        .as_deref()
        .map(|s| s.parse::<ReorderStatus>().map_err(AppError::Validation))
        .transpose()?;
    let product = query
        .product_id
        .as_deref()
        .map(|id| make_thing(PRODUCT_TABLE, id));
    let date_from = query
        .date_from
        .as_deref()
        .map(|d| time::parse_date(d).map(time::day_start_millis))
        .transpose()?;
    let date_to = query
        .date_to
        .as_deref()
        .map(|d| time::parse_date(d).map(time::day_end_millis))
        .transpose()?;

    let filter = ReorderListFilter {
        status,
        product,
        date_from,
        date_to,
        page,
        limit,
    };

    let (reorders, total) = state.reorder_engine.list_reorders(&filter).await?;
    let data: Vec<api::Reorder> = reorders.into_iter().map(Into::into).collect();
    Ok(ok(PaginatedResponse::new(data, total, page, limit)))
}

/// GET /api/reorders/stats - aggregate counts, no side effects
pub async fn stats(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<api::ReorderStats>>> {
    let raw = state.reorder_engine.reorder_stats(STATS_RECENT_LIMIT).await?;
    Ok(ok(api::ReorderStats {
        total_reorders: raw.total,
        pending: raw.pending,
        ordered: raw.ordered,
        received: raw.received,
        cancelled: raw.cancelled,
        recent: raw.recent.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/reorders/manual - manager only
pub async fn create_manual(
    State(state): State<ServerState>,
    actor: Actor,
    Json(payload): Json<ManualReorderRequest>,
) -> AppResult<Json<AppResponse<api::Reorder>>> {
    actor.require_procurement()?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let reorder = state
        .reorder_engine
        .create_manual_reorder(&payload.product_id, payload.quantity, &actor.id, payload.notes)
        .await?;

    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&payload.product_id)
        .await?;
    Ok(ok(reorder_with_product(reorder, product.as_ref())))
}

/// PATCH /api/reorders/{id}/status - manager only
pub async fn update_status(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<api::Reorder>>> {
    actor.require_procurement()?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let reorder = state
        .reorder_engine
        .update_reorder_status(&id, payload.status, payload.cost, payload.notes)
        .await?;

    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&reorder.product.to_string())
        .await?;
    Ok(ok(reorder_with_product(reorder, product.as_ref())))
}

/// POST /api/reorders/check-triggers - explicit full scan for the actor
pub async fn check_triggers(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<AppResponse<TriggerReport>>> {
    let outcome = state.reorder_engine.check_auto_reorder_triggers(&actor.id).await?;
    Ok(ok(TriggerReport {
        reorders_created: outcome.reorders_created,
        reorders: outcome.reorders.into_iter().map(Into::into).collect(),
    }))
}
