use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::{AppError, AppResult};
use shared::models::{CohortRetention, RestaurantPerformance};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "type")]
    pub report: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportResponse {
    Cohort {
        #[serde(rename = "cohortData")]
        cohort_data: Vec<CohortRetention>,
    },
    Performance {
        #[serde(rename = "performanceData")]
        performance_data: Vec<RestaurantPerformance>,
    },
}

/// GET /api/admin/analytics?type=cohort|performance
pub async fn report(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportResponse>> {
    let response = match query.report.as_deref() {
        Some("cohort") => ReportResponse::Cohort {
            cohort_data: stats::cohort_retention(&state.pool).await?,
        },
        Some("performance") => ReportResponse::Performance {
            performance_data: stats::restaurant_performance(&state.pool).await?,
        },
        _ => return Err(AppError::validation("Invalid analytics type")),
    };
    Ok(Json(response))
}
