//! Waitlist handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::SuccessResponse;
use crate::core::ServerState;
use crate::seating::{self, JoinWaitlist, Party};
use crate::utils::validation::{MAX_NAME_LEN, require_field, validate_email, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Assignment, WaitlistEntry, WaitlistJoin, WaitlistStatus};

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<i64>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub event_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConvertRequest {
    pub table_number: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct WaitlistResponse {
    pub waitlist: Vec<WaitlistEntry>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: WaitlistEntry,
}

#[derive(Debug, Serialize)]
pub struct PromoteResponse {
    pub notified: Option<WaitlistEntry>,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assignment: Assignment,
}

/// `user_id` wins over guest fields when both are sent
fn party_from(user_id: Option<i64>, guest_name: Option<String>, guest_email: Option<String>) -> AppResult<Party> {
    if let Some(id) = user_id {
        return Ok(Party::Member(id));
    }
    match guest_email {
        Some(email) if !email.trim().is_empty() => {
            validate_email(&email, "guest_email")?;
            validate_optional_text(&guest_name, "guest_name", MAX_NAME_LEN)?;
            Ok(Party::Guest {
                name: guest_name,
                email,
            })
        }
        _ => Err(AppError::validation(
            "Either user_id or guest_email is required",
        )),
    }
}

/// GET /api/admin/waitlist?eventId=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<WaitlistResponse>> {
    let dinner_id = require_field(query.event_id, "eventId")?;
    let waitlist = seating::list_waitlist(&state.pool, dinner_id).await?;
    Ok(Json(WaitlistResponse { waitlist }))
}

/// POST /api/admin/waitlist
pub async fn join(
    State(state): State<ServerState>,
    Json(payload): Json<WaitlistJoin>,
) -> AppResult<Json<EntryResponse>> {
    let dinner_id = require_field(payload.event_id, "event_id")?;
    let party = party_from(payload.user_id, payload.guest_name, payload.guest_email)?;
    let entry = seating::join_waitlist(&state.pool, JoinWaitlist { dinner_id, party }).await?;
    Ok(Json(EntryResponse { entry }))
}

/// DELETE /api/admin/waitlist?id= - withdraw an entry, promote if it held a seat
pub async fn remove(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<SuccessResponse>> {
    let entry_id = require_field(query.id, "id")?;
    let removed = seating::remove_from_waitlist(&state.pool, entry_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WaitlistEntryNotFound))?;

    // A withdrawn notified entry hands its seat to the next party
    if removed.status == WaitlistStatus::Notified
        && let Err(e) =
            seating::promote_next(&state.pool, state.notifier.as_ref(), removed.dinner_id).await
    {
        tracing::warn!(
            dinner_id = removed.dinner_id,
            error = %e,
            "Waitlist promotion after withdrawal failed"
        );
    }

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/waitlist/promote
pub async fn promote(
    State(state): State<ServerState>,
    Json(payload): Json<PromoteRequest>,
) -> AppResult<Json<PromoteResponse>> {
    let dinner_id = require_field(payload.event_id, "event_id")?;
    let notified = seating::promote_next(&state.pool, state.notifier.as_ref(), dinner_id).await?;
    Ok(Json(PromoteResponse { notified }))
}

/// POST /api/admin/waitlist/{id}/convert - body optional
pub async fn convert(
    State(state): State<ServerState>,
    Path(entry_id): Path<i64>,
    payload: Option<Json<ConvertRequest>>,
) -> AppResult<Json<AssignmentResponse>> {
    let Json(payload) = payload.unwrap_or_default();
    let assignment = seating::convert_entry(&state.pool, entry_id, payload.table_number).await?;
    Ok(Json(AssignmentResponse { assignment }))
}

/// GET /api/admin/waitlist/position?eventId=&userId= | &email=
pub async fn position(
    State(state): State<ServerState>,
    Query(query): Query<PositionQuery>,
) -> AppResult<Json<PositionResponse>> {
    let dinner_id = require_field(query.event_id, "eventId")?;
    let party = match (query.user_id, query.email) {
        (Some(id), _) => Party::Member(id),
        (None, Some(email)) if !email.trim().is_empty() => Party::Guest { name: None, email },
        _ => return Err(AppError::validation("Either userId or email is required")),
    };
    let position = seating::position_of(&state.pool, dinner_id, &party).await?;
    Ok(Json(PositionResponse { position }))
}
