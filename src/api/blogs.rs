use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_required, validate_slug};
use super::{ApiError, ApiResponse, AppState, BlogDto};
use crate::auth::Identity;
use crate::db::BlogInput;
use crate::slug::slugify;

#[derive(Debug, Deserialize)]
pub struct ListBlogsQuery {
    #[serde(default)]
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BlogRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
    /// Only used on create; updates take the author from the token.
    pub author: Option<String>,
    /// Hand-edited slug; omitted means derive from the title.
    pub slug: Option<String>,
    pub hero_image: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "draft".to_string()
}

fn validate_request(payload: &BlogRequest) -> Result<(), ApiError> {
    validate_required("Title", &payload.title)?;
    validate_required("Content", &payload.content)?;

    if payload.slug.is_none() && slugify(&payload.title).is_empty() {
        return Err(ApiError::validation(
            "Title must contain at least one letter or digit",
        ));
    }
    if let Some(slug) = &payload.slug {
        validate_slug(slug)?;
    }

    Ok(())
}

/// GET /blogs
/// `?published=true` is the public listing; the unfiltered view requires a
/// valid token.
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBlogsQuery>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<BlogDto>>>, ApiError> {
    let blogs = if query.published == Some(true) {
        state.store.list_published_blogs().await?
    } else {
        let authorized = crate::auth::token_from_headers(&headers)
            .and_then(|t| crate::auth::verify_token(&t, &state.config.auth.jwt_secret))
            .is_some();
        if !authorized {
            return Err(ApiError::unauthorized());
        }
        state.store.list_blogs().await?
    };

    let dtos = blogs.into_iter().map(BlogDto::from_model).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /blogs/{id}
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    let blog = state
        .store
        .get_blog(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog", id))?;

    Ok(Json(ApiResponse::success(BlogDto::from_model_rendered(blog))))
}

/// GET /blogs/slug/{slug}
pub async fn get_blog_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    let blog = state
        .store
        .get_blog_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog", slug))?;

    Ok(Json(ApiResponse::success(BlogDto::from_model_rendered(blog))))
}

/// POST /blogs
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<BlogRequest>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<BlogDto>>), ApiError> {
    validate_request(&payload)?;

    let author = payload
        .author
        .clone()
        .unwrap_or_else(|| identity.username.clone());

    let blog = state
        .store
        .create_blog(BlogInput {
            title: payload.title,
            description: payload.description,
            content: payload.content,
            author,
            slug: payload.slug,
            hero_image: payload.hero_image,
            status: payload.status,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::success(BlogDto::from_model(blog))),
    ))
}

/// PUT /blogs/{id}
/// Full-row update; the slug only changes when the title did (or a manual
/// slug was sent), and the author is stamped from the caller's identity.
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i32>,
    Json(payload): Json<BlogRequest>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    validate_request(&payload)?;

    let blog = state
        .store
        .update_blog(
            id,
            BlogInput {
                title: payload.title,
                description: payload.description,
                content: payload.content,
                author: identity.username.clone(),
                slug: payload.slug,
                hero_image: payload.hero_image,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(BlogDto::from_model(blog))))
}

/// DELETE /blogs/{id}
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_blog(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Blog", id))
    }
}
