//! Dinner API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/dinners", get(handler::list).post(handler::create))
        .route("/api/admin/dinners/{id}/capacity", get(handler::capacity))
}
