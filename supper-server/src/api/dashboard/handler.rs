use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::AppResult;
use shared::models::DashboardStats;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: DashboardStats,
}

/// GET /api/admin/dashboard/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let stats = stats::dashboard(&state.pool, shared::util::now_millis()).await?;
    Ok(Json(StatsResponse { stats }))
}
