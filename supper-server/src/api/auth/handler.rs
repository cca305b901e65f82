//! Login handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password_blocking;
use crate::core::ServerState;
use crate::db::repository::member;
use crate::security_log;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_PASSWORD_LEN, require_field, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserInfo,
    pub token: String,
}

/// POST /api/auth/login
///
/// Unknown email, missing password hash and wrong password all answer the
/// same 401 after the same argon2 work, so accounts cannot be enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = require_field(req.email, "email")?;
    let password = require_field(req.password, "password")?;
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;

    let found = member::find_credentials_by_email(&state.pool, &email).await?;

    // Argon2 runs on every attempt, known account or not
    let stored = found.as_ref().and_then(|a| a.password_hash.clone());
    let verified = verify_password_blocking(password, stored)
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::internal("Password verification failed")
        })?;

    let account = match found {
        Some(account) if verified => account,
        _ => {
            security_log!("WARN", "login_failed", email = email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let role = account.role.as_str();
    let token = state
        .get_jwt_service()
        .generate_token(account.id, &account.email, &account.name, role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(member_id = account.id, role, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user: UserInfo {
            id: account.id,
            email: account.email,
            name: account.name,
            role: role.to_string(),
        },
        token,
    }))
}
