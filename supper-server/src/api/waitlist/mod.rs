//! Waitlist API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/waitlist",
            get(handler::list)
                .post(handler::join)
                .delete(handler::remove),
        )
        .route("/api/admin/waitlist/promote", post(handler::promote))
        .route("/api/admin/waitlist/position", get(handler::position))
        .route("/api/admin/waitlist/{id}/convert", post(handler::convert))
}
