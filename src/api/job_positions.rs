use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, JobPositionDto};
use crate::db::JobPositionInput;

#[derive(Debug, Deserialize)]
pub struct ListPositionsQuery {
    /// Defaults to the public active-only view; `active=false` is the admin
    /// listing and requires a valid token.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct JobPositionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub department: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub experience_min: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_location() -> String {
    "Remote".to_string()
}

fn default_employment_type() -> String {
    "Full-time".to_string()
}

impl JobPositionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required("Title", &self.title)?;
        validate_required("Department", &self.department)?;

        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max)
            && min > max
        {
            return Err(ApiError::validation(
                "Minimum salary cannot exceed maximum salary",
            ));
        }
        Ok(())
    }

    fn into_input(self) -> JobPositionInput {
        JobPositionInput {
            title: self.title,
            description: self.description,
            department: self.department,
            location: self.location,
            employment_type: self.employment_type,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            experience_min: self.experience_min,
            is_active: self.is_active,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleFeaturedRequest {
    pub is_featured: bool,
}

/// GET /job-positions
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPositionsQuery>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<JobPositionDto>>>, ApiError> {
    let positions = if query.featured == Some(true) {
        state.store.list_featured_job_positions().await?
    } else if query.active == Some(false) {
        let authorized = crate::auth::token_from_headers(&headers)
            .and_then(|t| crate::auth::verify_token(&t, &state.config.auth.jwt_secret))
            .is_some();
        if !authorized {
            return Err(ApiError::unauthorized());
        }
        state.store.list_job_positions().await?
    } else {
        state.store.list_active_job_positions().await?
    };

    let dtos = positions.into_iter().map(JobPositionDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /job-positions/{id}
pub async fn get_position(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<JobPositionDto>>, ApiError> {
    let position = state
        .store
        .get_job_position(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job position", id))?;

    Ok(Json(ApiResponse::success(JobPositionDto::from(position))))
}

/// POST /job-positions
pub async fn create_position(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<JobPositionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobPositionDto>>), ApiError> {
    payload.validate()?;

    let position = state.store.create_job_position(payload.into_input()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(JobPositionDto::from(position))),
    ))
}

/// PUT /job-positions/{id}
pub async fn update_position(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<JobPositionRequest>,
) -> Result<Json<ApiResponse<JobPositionDto>>, ApiError> {
    payload.validate()?;

    let position = state
        .store
        .update_job_position(id, payload.into_input())
        .await?;

    Ok(Json(ApiResponse::success(JobPositionDto::from(position))))
}

/// PATCH /job-positions/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ToggleActiveRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let updated = state
        .store
        .toggle_job_position_active(id, payload.is_active)
        .await?;

    if updated {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Job position", id))
    }
}

/// PATCH /job-positions/{id}/toggle-featured
pub async fn toggle_featured(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ToggleFeaturedRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let updated = state
        .store
        .toggle_job_position_featured(id, payload.is_featured)
        .await?;

    if updated {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Job position", id))
    }
}

/// DELETE /job-positions/{id}
/// Applications referencing the position survive with a null link.
pub async fn delete_position(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_job_position(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Job position", id))
    }
}
