//! Reorder API module

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reorders", reorder_routes())
}

fn reorder_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/manual", post(handler::create_manual))
        .route("/check-triggers", post(handler::check_triggers))
        .route("/{id}/status", patch(handler::update_status))
}
