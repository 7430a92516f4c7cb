use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_email, validate_one_of, validate_required};
use super::{ApiError, ApiResponse, AppState, ContactDto, StatusUpdateRequest};
use crate::db::ContactInput;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// POST /contact — public submission endpoint.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactDto>>), ApiError> {
    validate_required("Name", &payload.name)?;
    validate_required("Message", &payload.message)?;
    validate_email(&payload.email)?;

    let contact = state
        .store
        .create_contact(ContactInput {
            name: payload.name,
            email: payload.email,
            company: payload.company,
            subject: payload.subject,
            message: payload.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(contact))))
}

/// GET /contacts — admin inbox, newest first.
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ContactDto>>>, ApiError> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(ApiResponse::success(contacts)))
}

/// GET /contacts/{id}
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    let contact = state
        .store
        .get_contact(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact", id))?;

    Ok(Json(ApiResponse::success(contact)))
}

/// PUT /contacts/{id}/status — the only mutation a submission allows.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    validate_one_of("Status", &payload.status, &["new", "read", "replied"])?;

    let updated = state.store.update_contact_status(id, &payload.status).await?;
    if updated {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Contact", id))
    }
}

/// DELETE /contacts/{id}
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_contact(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Contact", id))
    }
}
