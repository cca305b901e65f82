//! Member handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::core::ServerState;
use crate::db::repository::member;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Member, MemberCreate};

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub member: Member,
}

/// GET /api/admin/members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<MembersResponse>> {
    let members = member::find_all(&state.pool).await?;
    Ok(Json(MembersResponse { members }))
}

/// POST /api/admin/members
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<MemberCreate>,
) -> AppResult<Json<MemberResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let password_hash = match payload.password.take() {
        Some(password) if !password.is_empty() => Some(
            hash_password(&password)
                .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?,
        ),
        _ => None,
    };

    let member = member::create(&state.pool, payload, password_hash).await?;
    tracing::info!(member_id = member.id, role = member.role.as_str(), "Member created");

    Ok(Json(MemberResponse { member }))
}
