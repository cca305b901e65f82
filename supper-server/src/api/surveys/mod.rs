//! Survey API
//!
//! Onboarding and post-dinner questions, plus member answers per dinner.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/surveys",
            get(handler::list)
                .post(handler::create)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/admin/surveys/responses", post(handler::submit_response))
}
