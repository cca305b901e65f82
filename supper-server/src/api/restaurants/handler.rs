//! Restaurant handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::SuccessResponse;
use crate::core::ServerState;
use crate::db::repository::{RepoError, restaurant};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, require_field,
    validate_email, validate_optional_text, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub restaurant: Restaurant,
}

fn validate_details(
    address: &Option<String>,
    neighborhood: &Option<String>,
    contact_name: &Option<String>,
    contact_phone: &Option<String>,
    contact_email: &Option<String>,
    capacity: Option<i64>,
    notes: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(neighborhood, "neighborhood", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(contact_name, "contact_name", MAX_NAME_LEN)?;
    validate_optional_text(contact_phone, "contact_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(notes, "notes", MAX_NOTE_LEN)?;
    if let Some(email) = contact_email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email, "contact_email")?;
    }
    if let Some(capacity) = capacity {
        validate_positive(capacity, "capacity")?;
    }
    Ok(())
}

/// GET /api/admin/restaurants
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<RestaurantsResponse>> {
    let restaurants = restaurant::find_all(&state.pool).await?;
    Ok(Json(RestaurantsResponse { restaurants }))
}

/// POST /api/admin/restaurants
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<RestaurantResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_details(
        &payload.address,
        &payload.neighborhood,
        &payload.contact_name,
        &payload.contact_phone,
        &payload.contact_email,
        payload.capacity,
        &payload.notes,
    )?;

    let restaurant = restaurant::create(&state.pool, payload).await?;
    tracing::info!(restaurant_id = restaurant.id, "Restaurant created");
    Ok(Json(RestaurantResponse { restaurant }))
}

/// PUT /api/admin/restaurants - partial update, absent fields keep their value
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<RestaurantResponse>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_details(
        &payload.address,
        &payload.neighborhood,
        &payload.contact_name,
        &payload.contact_phone,
        &payload.contact_email,
        payload.capacity,
        &payload.notes,
    )?;

    let restaurant = restaurant::update(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::RestaurantNotFound),
            other => other.into(),
        })?;
    Ok(Json(RestaurantResponse { restaurant }))
}

/// DELETE /api/admin/restaurants?id= - hosted dinners keep their row, lose the link
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<SuccessResponse>> {
    let id = require_field(query.id, "id")?;
    if !restaurant::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }
    tracing::info!(restaurant_id = id, "Restaurant deleted");
    Ok(Json(SuccessResponse::ok()))
}
