use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::validation::{validate_link, validate_max_len, validate_one_of, validate_required};
use super::{ApiError, ApiResponse, AppState, HeroSlideDto};
use crate::db::HeroSlideInput;

const VISUAL_TYPES: &[&str] = &["dashboard", "analytics", "team", "growth", "innovation"];

/// Base path the legacy admin forms redirect back to, with the outcome in
/// the query string.
const ADMIN_PATH: &str = "/admin/hero-slides";

fn redirect_message(message: &str) -> Response {
    Redirect::to(&format!("{ADMIN_PATH}?message={message}")).into_response()
}

fn redirect_error(error: &str) -> Response {
    Redirect::to(&format!("{ADMIN_PATH}?error={error}")).into_response()
}

/// GET /hero-slides — admin listing in carousel order.
pub async fn list_slides(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HeroSlideDto>>>, ApiError> {
    let slides = state.store.list_hero_slides().await?;
    Ok(Json(ApiResponse::success(slides)))
}

/// GET /hero-slides/active — the public carousel.
pub async fn list_active_slides(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HeroSlideDto>>>, ApiError> {
    let slides = state.store.list_active_hero_slides().await?;
    Ok(Json(ApiResponse::success(slides)))
}

/// GET /hero-slides/{id}
pub async fn get_slide(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<HeroSlideDto>>, ApiError> {
    let slide = state
        .store
        .get_hero_slide(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hero slide", id))?;

    Ok(Json(ApiResponse::success(slide)))
}

/// POST /hero-slides
///
/// Legacy form-post endpoint: multipart body with an `action` discriminator,
/// answering with redirects that carry the outcome in the query string.
pub async fn handle_admin_form(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let fields = match collect_fields(multipart).await {
        Ok(fields) => fields,
        Err(_) => return redirect_error("invalid-form"),
    };

    match fields.get("action").map(String::as_str) {
        Some("create") => create_slide(&state, &fields).await,
        Some("update") => update_slide(&state, &fields).await,
        Some("toggle-status") => toggle_slide_status(&state, &fields).await,
        Some("delete") => delete_slide(&state, &fields).await,
        _ => redirect_error("invalid-action"),
    }
}

async fn collect_fields(mut multipart: Multipart) -> Result<HashMap<String, String>, ApiError> {
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid multipart data"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|_| ApiError::validation("Invalid multipart data"))?;
        fields.insert(name, value.trim().to_string());
    }

    Ok(fields)
}

fn parse_input(fields: &HashMap<String, String>) -> Result<HeroSlideInput, ApiError> {
    let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let optional = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    let title = get("title");
    let description = get("description");
    validate_required("Title", &title)?;
    validate_required("Description", &description)?;
    validate_max_len("Title", &title, 200)?;
    validate_max_len("Description", &description, 500)?;

    let visual_type = optional("visual_type").unwrap_or_else(|| "dashboard".to_string());
    validate_one_of("Visual type", &visual_type, VISUAL_TYPES)?;

    let background_image = optional("background_image");
    if let Some(image) = &background_image {
        validate_link("Background image", image)?;
    }

    let button_link = optional("button_link");
    if let Some(link) = &button_link {
        validate_link("Button link", link)?;
    }

    Ok(HeroSlideInput {
        title,
        subtitle: optional("subtitle"),
        description,
        background_image,
        button_text: optional("button_text"),
        button_link,
        visual_type,
        is_active: get("is_active") == "1",
        sort_order: get("sort_order").parse().unwrap_or(1),
    })
}

async fn create_slide(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let input = match parse_input(fields) {
        Ok(input) => input,
        Err(_) => return redirect_error("missing-fields"),
    };
    let activate = input.is_active;

    let slide = match state.store.create_hero_slide(input).await {
        Ok(slide) => slide,
        Err(e) => {
            tracing::error!("Failed to create hero slide: {e}");
            return redirect_error("create-failed");
        }
    };

    if activate && state.store.activate_only_hero_slide(slide.id).await.is_err() {
        return redirect_error("create-failed");
    }

    redirect_message("slide-created")
}

async fn update_slide(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };

    let input = match parse_input(fields) {
        Ok(input) => input,
        Err(_) => return redirect_error("missing-fields"),
    };
    let activate = input.is_active;

    match state.store.update_hero_slide(id, input).await {
        Ok(_) => {}
        Err(e) if e.downcast_ref::<crate::db::RepoError>().is_some() => {
            return redirect_error("slide-not-found");
        }
        Err(e) => {
            tracing::error!("Failed to update hero slide {id}: {e}");
            return redirect_error("update-failed");
        }
    }

    let result = if activate {
        state.store.activate_only_hero_slide(id).await
    } else {
        state.store.deactivate_hero_slide(id).await
    };

    if result.is_err() {
        return redirect_error("update-failed");
    }

    redirect_message("slide-updated")
}

async fn toggle_slide_status(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };
    let Some(status) = fields.get("status") else {
        return redirect_error("missing-fields");
    };

    // Activating routes through the exclusivity helper; deactivating only
    // touches this slide.
    let result = if status == "1" {
        state.store.activate_only_hero_slide(id).await
    } else {
        state.store.deactivate_hero_slide(id).await
    };

    match result {
        Ok(true) => redirect_message(if status == "1" {
            "slide-activated"
        } else {
            "slide-deactivated"
        }),
        Ok(false) => redirect_error("slide-not-found"),
        Err(e) => {
            tracing::error!("Failed to toggle hero slide {id}: {e}");
            redirect_error("toggle-failed")
        }
    }
}

async fn delete_slide(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };

    match state.store.delete_hero_slide(id).await {
        Ok(true) => redirect_message("slide-deleted"),
        Ok(false) => redirect_error("slide-not-found"),
        Err(e) => {
            tracing::error!("Failed to delete hero slide {id}: {e}");
            redirect_error("delete-failed")
        }
    }
}
