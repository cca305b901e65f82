//! Seat assignment handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::SuccessResponse;
use crate::core::ServerState;
use crate::db::repository::{assignment, member};
use crate::seating::{self, AssignMember};
use crate::utils::AppResult;
use crate::utils::validation::require_field;
use shared::models::{Assignment, AssignmentCreate, AssignmentDetail, AvailableMember, TableUpdate};

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsResponse {
    pub assignments: Vec<AssignmentDetail>,
    pub available_members: Vec<AvailableMember>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assignment: Assignment,
}

/// GET /api/admin/groups?eventId= - assignments and members still seatable
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<GroupsResponse>> {
    let dinner_id = require_field(query.event_id, "eventId")?;
    let assignments = assignment::find_details_by_dinner(&state.pool, dinner_id).await?;
    let available_members = member::find_available_for_dinner(&state.pool, dinner_id).await?;
    Ok(Json(GroupsResponse {
        assignments,
        available_members,
    }))
}

/// POST /api/admin/groups - seat a member
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AssignmentCreate>,
) -> AppResult<Json<AssignmentResponse>> {
    let req = AssignMember {
        dinner_id: require_field(payload.event_id, "event_id")?,
        member_id: require_field(payload.user_id, "user_id")?,
        table_number: payload.table_number,
    };
    let assignment = seating::assign_member(&state.pool, req).await?;
    Ok(Json(AssignmentResponse { assignment }))
}

/// PUT /api/admin/groups - move an assignment to another table
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<TableUpdate>,
) -> AppResult<Json<AssignmentResponse>> {
    let assignment_id = require_field(payload.assignment_id, "assignment_id")?;
    let table_number = require_field(payload.table_number, "table_number")?;
    let assignment = seating::update_table(&state.pool, assignment_id, table_number).await?;
    Ok(Json(AssignmentResponse { assignment }))
}

/// DELETE /api/admin/groups?id= - remove an assignment, refund, promote
///
/// Unknown ids still answer `{success: true}`.
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<SuccessResponse>> {
    let assignment_id = require_field(query.id, "id")?;

    if let Some(removed) = seating::remove_assignment(&state.pool, assignment_id).await? {
        // The seat is already freed; a failed promotion must not fail the removal
        if let Err(e) =
            seating::promote_next(&state.pool, state.notifier.as_ref(), removed.dinner_id).await
        {
            tracing::warn!(
                dinner_id = removed.dinner_id,
                error = %e,
                "Waitlist promotion after removal failed"
            );
        }
    }

    Ok(Json(SuccessResponse::ok()))
}
