use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_email;
use super::{ApiError, ApiResponse, AppState, MessageResponse, SubscriptionDto};
use crate::db::SubscriptionStats;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

fn default_kind() -> String {
    "general".to_string()
}

fn default_source() -> String {
    "website".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: String,
}

/// POST /newsletter/subscribe
///
/// An email that is already actively subscribed is a conflict; an
/// unsubscribed one is flipped back to active rather than duplicated
/// (the unique email constraint backs this); a new one is inserted.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    validate_email(&payload.email)?;

    let email = payload.email.to_lowercase().trim().to_string();

    if let Some(existing) = state.store.get_subscription_by_email(&email).await? {
        if existing.status == "active" {
            return Err(ApiError::Conflict(
                "This email is already subscribed".to_string(),
            ));
        }

        state.store.resubscribe(&email).await?;
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::success(MessageResponse {
                message: "Subscription reactivated".to_string(),
            })),
        ));
    }

    let metadata = payload
        .metadata
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ApiError::internal(format!("Failed to serialize metadata: {e}")))?;

    state
        .store
        .subscribe(&email, &payload.kind, Some(&payload.source), metadata)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MessageResponse {
            message: "Subscribed successfully".to_string(),
        })),
    ))
}

/// POST /newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UnsubscribeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_email(&payload.email)?;

    let email = payload.email.to_lowercase().trim().to_string();
    let updated = state.store.unsubscribe(&email).await?;

    if updated {
        Ok(Json(ApiResponse::success(MessageResponse {
            message: "Unsubscribed".to_string(),
        })))
    } else {
        Err(ApiError::not_found("Subscription", email))
    }
}

/// GET /newsletter/status?email=
pub async fn subscription_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ApiResponse<Option<SubscriptionDto>>>, ApiError> {
    validate_email(&query.email)?;

    let subscription = state
        .store
        .get_subscription_by_email(&query.email.to_lowercase())
        .await?;

    Ok(Json(ApiResponse::success(
        subscription.map(SubscriptionDto::from),
    )))
}

/// GET /newsletter — admin list, newest subscriptions first.
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SubscriptionDto>>>, ApiError> {
    let rows = state.store.list_subscriptions().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(SubscriptionDto::from).collect(),
    )))
}

/// GET /newsletter/stats — per-audience totals.
pub async fn subscription_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SubscriptionStats>>>, ApiError> {
    let stats = state.store.subscription_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// DELETE /newsletter/{id}
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.store.delete_subscription(id).await?;
    if deleted {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::not_found("Subscription", id))
    }
}
