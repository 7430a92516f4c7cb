use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::validation::{validate_link, validate_max_len, validate_rating, validate_required};
use super::{ApiError, ApiResponse, AppState, TestimonialDto};
use crate::db::TestimonialInput;

const ADMIN_PATH: &str = "/admin/testimonials";

fn redirect_message(message: &str) -> Response {
    Redirect::to(&format!("{ADMIN_PATH}?message={message}")).into_response()
}

fn redirect_error(error: &str) -> Response {
    Redirect::to(&format!("{ADMIN_PATH}?error={error}")).into_response()
}

/// GET /testimonials — admin listing, newest first.
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TestimonialDto>>>, ApiError> {
    let testimonials = state.store.list_testimonials().await?;
    Ok(Json(ApiResponse::success(testimonials)))
}

/// GET /testimonials/active — public quotes, featured first.
pub async fn list_active_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TestimonialDto>>>, ApiError> {
    let testimonials = state.store.list_active_testimonials().await?;
    Ok(Json(ApiResponse::success(testimonials)))
}

/// GET /testimonials/{id}
pub async fn get_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TestimonialDto>>, ApiError> {
    let testimonial = state
        .store
        .get_testimonial(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial", id))?;

    Ok(Json(ApiResponse::success(testimonial)))
}

/// POST /testimonials
///
/// Legacy form-post endpoint mirroring the hero-slide admin forms: an
/// `action` discriminator and redirect responses.
pub async fn handle_admin_form(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut fields: HashMap<String, String> = HashMap::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match field.text().await {
                    Ok(value) => {
                        fields.insert(name, value.trim().to_string());
                    }
                    Err(_) => return redirect_error("invalid-form"),
                }
            }
            Ok(None) => break,
            Err(_) => return redirect_error("invalid-form"),
        }
    }

    match fields.get("action").map(String::as_str) {
        Some("create") => create_testimonial(&state, &fields).await,
        Some("update") => update_testimonial(&state, &fields).await,
        Some("toggle-status") => toggle_flag(&state, &fields, Flag::Active).await,
        Some("toggle-featured") => toggle_flag(&state, &fields, Flag::Featured).await,
        Some("delete") => delete_testimonial(&state, &fields).await,
        _ => redirect_error("invalid-action"),
    }
}

fn parse_input(fields: &HashMap<String, String>) -> Result<TestimonialInput, ApiError> {
    let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let optional = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    let name = get("name");
    let position = get("position");
    let content = get("content");
    validate_required("Name", &name)?;
    validate_required("Position", &position)?;
    validate_required("Content", &content)?;
    validate_max_len("Name", &name, 100)?;
    validate_max_len("Position", &position, 100)?;
    validate_max_len("Content", &content, 1000)?;

    let company = optional("company");
    if let Some(company) = &company {
        validate_max_len("Company", company, 100)?;
    }

    let rating = get("rating").parse().unwrap_or(0);
    validate_rating(rating)?;

    let avatar_url = optional("avatar_url");
    if let Some(url) = &avatar_url {
        validate_link("Avatar URL", url)?;
    }

    Ok(TestimonialInput {
        name,
        position,
        company,
        content,
        avatar_url,
        rating,
        is_active: get("is_active") == "1",
        is_featured: get("is_featured") == "1",
    })
}

async fn create_testimonial(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let input = match parse_input(fields) {
        Ok(input) => input,
        Err(_) => return redirect_error("missing-fields"),
    };

    match state.store.create_testimonial(input).await {
        Ok(_) => redirect_message("testimonial-created"),
        Err(e) => {
            tracing::error!("Failed to create testimonial: {e}");
            redirect_error("create-failed")
        }
    }
}

async fn update_testimonial(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };

    let input = match parse_input(fields) {
        Ok(input) => input,
        Err(_) => return redirect_error("missing-fields"),
    };

    match state.store.update_testimonial(id, input).await {
        Ok(_) => redirect_message("testimonial-updated"),
        Err(e) if e.downcast_ref::<crate::db::RepoError>().is_some() => {
            redirect_error("testimonial-not-found")
        }
        Err(e) => {
            tracing::error!("Failed to update testimonial {id}: {e}");
            redirect_error("update-failed")
        }
    }
}

enum Flag {
    Active,
    Featured,
}

async fn toggle_flag(state: &AppState, fields: &HashMap<String, String>, flag: Flag) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };
    let Some(status) = fields.get("status") else {
        return redirect_error("missing-fields");
    };
    let value = status == "1";

    let result = match flag {
        Flag::Active => state.store.toggle_testimonial_active(id, value).await,
        Flag::Featured => state.store.toggle_testimonial_featured(id, value).await,
    };

    match result {
        Ok(true) => redirect_message("testimonial-updated"),
        Ok(false) => redirect_error("testimonial-not-found"),
        Err(e) => {
            tracing::error!("Failed to toggle testimonial {id}: {e}");
            redirect_error("toggle-failed")
        }
    }
}

async fn delete_testimonial(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let Some(id) = fields.get("id").and_then(|v| v.parse::<i32>().ok()) else {
        return redirect_error("missing-fields");
    };

    match state.store.delete_testimonial(id).await {
        Ok(true) => redirect_message("testimonial-deleted"),
        Ok(false) => redirect_error("testimonial-not-found"),
        Err(e) => {
            tracing::error!("Failed to delete testimonial {id}: {e}");
            redirect_error("delete-failed")
        }
    }
}
