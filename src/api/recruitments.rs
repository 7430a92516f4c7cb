use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::validation::{validate_email, validate_one_of, validate_required};
use super::{ApiError, ApiResponse, AppState, RecruitmentDto, StatusUpdateRequest};
use crate::db::RecruitmentInput;

/// MIME types accepted for CV uploads.
const CV_ALLOWED_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

fn cv_extension(content_type: &str) -> &'static str {
    match content_type {
        "application/pdf" => "pdf",
        "application/msword" => "doc",
        _ => "docx",
    }
}

struct CvUpload {
    content_type: String,
    bytes: axum::body::Bytes,
}

/// POST /recruitments — public application intake. Multipart because the
/// careers form may attach a CV; the file is buffered fully before any
/// validation or write.
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<RecruitmentDto>>), ApiError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut cv: Option<CvUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid multipart data"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "cv" {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::validation("Failed to read CV upload"))?;
            if !bytes.is_empty() {
                cv = Some(CvUpload {
                    content_type,
                    bytes,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::validation("Invalid multipart data"))?;
            fields.insert(name, value);
        }
    }

    let name = fields.get("name").cloned().unwrap_or_default();
    let email = fields.get("email").cloned().unwrap_or_default();
    let position = fields.get("position").cloned().unwrap_or_default();

    validate_required("Name", &name)?;
    validate_required("Position", &position)?;
    validate_email(&email)?;

    let position_id = fields
        .get("position_id")
        .and_then(|v| v.parse::<i32>().ok());

    let cv_path = match cv {
        Some(upload) => Some(save_cv(&state, &upload).await?),
        None => None,
    };

    let optional = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    let recruitment = state
        .store
        .create_recruitment(RecruitmentInput {
            name,
            email,
            phone: optional("phone"),
            position,
            experience: optional("experience"),
            salary_expectation: optional("salary_expectation"),
            cv_path,
            cover_letter: optional("cover_letter"),
            position_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RecruitmentDto::from(recruitment))),
    ))
}

/// Validate and persist the CV, returning its public path.
async fn save_cv(state: &AppState, upload: &CvUpload) -> Result<String, ApiError> {
    if upload.bytes.len() > state.config.uploads.max_cv_bytes {
        return Err(ApiError::validation("CV file may not exceed 5MB"));
    }

    if !CV_ALLOWED_TYPES.contains(&upload.content_type.as_str()) {
        return Err(ApiError::validation(
            "Only PDF, DOC or DOCX files are accepted",
        ));
    }

    let filename = format!(
        "cv_{}.{}",
        chrono::Utc::now().timestamp_millis(),
        cv_extension(&upload.content_type)
    );

    let dir = std::path::Path::new(&state.config.uploads.path).join("cv");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create CV directory: {e}")))?;

    tokio::fs::write(dir.join(&filename), &upload.bytes)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to save CV: {e}")))?;

    tracing::info!("Stored CV {} ({} bytes)", filename, upload.bytes.len());

    Ok(format!("/uploads/cv/{filename}"))
}

/// GET /recruitments — admin review list with linked position titles.
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RecruitmentDto>>>, ApiError> {
    let rows = state.store.list_recruitments().await?;
    let dtos = rows.into_iter().map(RecruitmentDto::from_row).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /recruitments/{id}
pub async fn get_application(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RecruitmentDto>>, ApiError> {
    let recruitment = state
        .store
        .get_recruitment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application", id))?;

    Ok(Json(ApiResponse::success(RecruitmentDto::from(recruitment))))
}

/// PUT /recruitments/{id}/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    validate_one_of(
        "Status",
        &payload.status,
        &["new", "reviewing", "interview", "hired", "rejected"],
    )?;

    let updated = state
        .store
        .update_recruitment_status(id, &payload.status)
        .await?;

    if updated {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Application", id))
    }
}

/// DELETE /recruitments/{id}
pub async fn delete_application(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_recruitment(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Application", id))
    }
}
