use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_link, validate_one_of, validate_required};
use super::{ApiError, ApiResponse, AppState, BannerDto};
use crate::db::BannerInput;

const BANNER_TYPES: &[&str] = &["system", "news", "event", "promotion", "warning"];
const SHOW_ON_PAGES: &[&str] = &["all", "home", "specific"];

#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    pub title: String,
    pub description: Option<String>,
    pub banner_type: String,
    pub image_url: Option<String>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub dismissible: bool,
    #[serde(default = "default_show_on_pages")]
    pub show_on_pages: String,
}

fn default_true() -> bool {
    true
}

fn default_show_on_pages() -> String {
    "all".to_string()
}

impl BannerRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required("Title", &self.title)?;
        validate_one_of("Banner type", &self.banner_type, BANNER_TYPES)?;
        validate_one_of("Show on pages", &self.show_on_pages, SHOW_ON_PAGES)?;

        for (field, value) in [
            ("Image URL", &self.image_url),
            ("Action URL", &self.action_url),
        ] {
            if let Some(url) = value {
                validate_link(field, url)?;
            }
        }
        Ok(())
    }

    fn into_input(self) -> BannerInput {
        BannerInput {
            title: self.title,
            description: self.description,
            banner_type: self.banner_type,
            image_url: self.image_url,
            action_url: self.action_url,
            action_text: self.action_text,
            is_active: self.is_active,
            dismissible: self.dismissible,
            show_on_pages: self.show_on_pages,
        }
    }
}

/// GET /banners — admin listing, newest first.
pub async fn list_banners(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BannerDto>>>, ApiError> {
    let banners = state.store.list_banners().await?;
    Ok(Json(ApiResponse::success(banners)))
}

/// GET /banners/active — what the public site renders.
pub async fn list_active_banners(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BannerDto>>>, ApiError> {
    let banners = state.store.list_active_banners().await?;
    Ok(Json(ApiResponse::success(banners)))
}

/// GET /banners/{id}
pub async fn get_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BannerDto>>, ApiError> {
    let banner = state
        .store
        .get_banner(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Banner", id))?;

    Ok(Json(ApiResponse::success(banner)))
}

/// POST /banners
pub async fn create_banner(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BannerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BannerDto>>), ApiError> {
    payload.validate()?;
    let activate = payload.is_active;

    let banner = state.store.create_banner(payload.into_input()).await?;

    // Creating an active banner displaces whichever banner was active.
    if activate {
        state.store.activate_only_banner(banner.id).await?;
    }

    let banner = state
        .store
        .get_banner(banner.id)
        .await?
        .ok_or_else(|| ApiError::internal("Banner disappeared after creation"))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(banner))))
}

/// PUT /banners/{id}
pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<BannerRequest>,
) -> Result<Json<ApiResponse<BannerDto>>, ApiError> {
    payload.validate()?;
    let activate = payload.is_active;

    state.store.update_banner(id, payload.into_input()).await?;

    if activate {
        if !state.store.activate_only_banner(id).await? {
            return Err(ApiError::not_found("Banner", id));
        }
    } else {
        state.store.deactivate_banner(id).await?;
    }

    let banner = state
        .store
        .get_banner(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Banner", id))?;

    Ok(Json(ApiResponse::success(banner)))
}

/// DELETE /banners/{id}
pub async fn delete_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_banner(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Banner", id))
    }
}
