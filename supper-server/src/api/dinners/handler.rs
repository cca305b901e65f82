//! Dinner handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{dinner, restaurant};
use crate::seating;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Capacity, DinnerCreate, DinnerWithStats};

#[derive(Debug, Serialize)]
pub struct DinnersResponse {
    pub dinners: Vec<DinnerWithStats>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

/// GET /api/admin/dinners - newest event first, with seat counts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<DinnersResponse>> {
    let dinners = dinner::find_all_with_stats(&state.pool).await?;
    Ok(Json(DinnersResponse { dinners }))
}

/// POST /api/admin/dinners - create a draft dinner
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<DinnerCreate>,
) -> AppResult<Json<CreatedResponse>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(seats) = payload.seats {
        validate_positive(seats, "seats")?;
    }
    if let Some(restaurant_id) = payload.restaurant_id
        && restaurant::find_by_id(&state.pool, restaurant_id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    let id = dinner::create(&state.pool, payload, Some(current_user.id)).await?;
    tracing::info!(dinner_id = id, created_by = current_user.id, "Dinner created");

    Ok(Json(CreatedResponse { success: true, id }))
}

/// GET /api/admin/dinners/{id}/capacity
pub async fn capacity(
    State(state): State<ServerState>,
    Path(dinner_id): Path<i64>,
) -> AppResult<Json<Capacity>> {
    let capacity = seating::check_capacity(&state.pool, dinner_id).await?;
    Ok(Json(capacity))
}
