use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_one_of, validate_required};
use super::{ApiError, ApiResponse, AppState, MessageResponse, UserDto};
use crate::auth::Identity;

/// The seeded primary admin; it can never be deleted.
const PRIMARY_ADMIN_ID: i32 = 1;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// POST /users — admin only.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    if !identity.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can create users".to_string(),
        ));
    }

    validate_required("Username", &payload.username)?;
    validate_one_of("Role", &payload.role, &["admin", "editor", "viewer"])?;

    if payload.password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    let user = state
        .store
        .create_user(&payload.username, &payload.password, &payload.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

/// PUT /users/password — change the caller's own password after verifying
/// the current one.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if payload.new_password.len() < 6 {
        return Err(ApiError::validation(
            "New password must be at least 6 characters",
        ));
    }
    if payload.current_password == payload.new_password {
        return Err(ApiError::validation(
            "New password must be different from current password",
        ));
    }

    let verified = state
        .store
        .verify_credentials(&identity.username, &payload.current_password)
        .await
        .map_err(|e| ApiError::internal(format!("Password verification error: {e}")))?;

    if verified.is_none() {
        return Err(ApiError::validation("Current password is incorrect"));
    }

    state
        .store
        .update_user_password(identity.id, &payload.new_password)
        .await?;

    tracing::info!("Password changed for user: {}", identity.username);

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password updated successfully".to_string(),
    })))
}

/// DELETE /users/{id} — admin only; the primary admin and the caller's own
/// account are protected.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    if !identity.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can delete users".to_string(),
        ));
    }

    if id == PRIMARY_ADMIN_ID {
        return Err(ApiError::validation(
            "The primary admin account cannot be deleted",
        ));
    }

    if id == identity.id {
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    let deleted = state.store.delete_user(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("User", id))
    }
}
