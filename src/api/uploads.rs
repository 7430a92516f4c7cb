use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UploadResponse};

/// MIME types accepted for image uploads.
const IMAGE_ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// POST /uploads/image
///
/// Buffers the whole file, checks the MIME allow-list and size cap, then
/// writes it under the public uploads directory with a timestamp-prefixed
/// name so concurrent uploads never collide.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid multipart data"))?
        .ok_or_else(|| ApiError::validation("No file provided"))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    if !IMAGE_ALLOWED_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::validation(
            "Unsupported file type. Allowed: JPG, PNG, GIF and WebP.",
        ));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|_| ApiError::validation("Failed to read file data"))?;

    if bytes.is_empty() {
        return Err(ApiError::validation("Empty file"));
    }
    if bytes.len() > state.config.uploads.max_image_bytes {
        return Err(ApiError::validation("File too large. Maximum size is 10MB."));
    }

    let filename = format!(
        "blog-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        image_extension(&content_type)
    );

    let dir = std::path::Path::new(&state.config.uploads.path);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create upload directory: {e}")))?;

    tokio::fs::write(dir.join(&filename), &bytes)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to save file: {e}")))?;

    tracing::info!("Image uploaded: {} ({} bytes)", filename, bytes.len());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UploadResponse {
            url: format!("/uploads/{filename}"),
            filename,
            size: bytes.len(),
        })),
    ))
}
