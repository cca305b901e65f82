//! API routes
//!
//! - [`health`] - liveness and database check (public)
//! - [`auth`] - login (public)
//! - [`groups`] - seat assignments
//! - [`waitlist`] - per-dinner waitlist
//! - [`dinners`] - dinners and capacity
//! - [`members`] - member accounts
//! - [`restaurants`] - restaurant partners
//! - [`surveys`] - survey questions and answers
//! - [`dashboard`] - summary figures
//! - [`analytics`] - cohort retention and restaurant performance
//!
//! Everything under `/api/admin` requires an admin token.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod dinners;
pub mod groups;
pub mod health;
pub mod members;
pub mod restaurants;
pub mod surveys;
pub mod waitlist;


use std::time::Duration;

use axum::{Router, middleware};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_auth};
use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .merge(groups::router())
        .merge(waitlist::router())
        .merge(dinners::router())
        .merge(members::router())
        .merge(restaurants::router())
        .merge(surveys::router())
        .merge(dashboard::router())
        .merge(analytics::router())
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(admin_routes)
}

/// Fully configured application, used by the server and by router tests
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        // JWT authentication; require_auth skips public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
