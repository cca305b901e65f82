//! Restaurant partner API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/restaurants",
        get(handler::list)
            .post(handler::create)
            .put(handler::update)
            .delete(handler::delete),
    )
}
