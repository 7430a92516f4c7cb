use axum::{
    Json,
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LoginResponse, MessageResponse};
use crate::auth::{Identity, generate_token, login_cookie, logout_cookie, token_from_headers};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Reject the request unless it carries a valid token in the
/// `Authorization: Bearer` header or the auth cookie. The decoded identity
/// is made available to handlers via request extensions. Expired, forged
/// and malformed tokens are indistinguishable to the client.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = token_from_headers(request.headers())
        .and_then(|token| crate::auth::verify_token(&token, &state.config.auth.jwt_secret));

    let Some(identity) = identity else {
        return Err(ApiError::unauthorized());
    };

    tracing::Span::current().record("user_id", identity.username.as_str());
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Verify credentials, issue a 24h token and set the auth cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .store
        .verify_credentials(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    let Some(user) = user else {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    let identity = Identity {
        id: user.id,
        username: user.username,
        role: user.role,
    };

    let token = generate_token(&identity, &state.config.auth.jwt_secret)
        .map_err(|e| ApiError::internal(format!("Failed to sign token: {e}")))?;

    tracing::info!("User '{}' logged in", identity.username);

    let mut response = Json(ApiResponse::success(LoginResponse {
        token: token.clone(),
        user: identity,
    }))
    .into_response();

    let cookie = login_cookie(&token)
        .parse()
        .map_err(|_| ApiError::internal("Failed to build auth cookie"))?;
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}

/// POST /auth/logout
/// Stateless tokens cannot be revoked; logout clears the cookie.
pub async fn logout() -> Result<Response, ApiError> {
    let mut response = Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }))
    .into_response();

    let cookie = logout_cookie()
        .parse()
        .map_err(|_| ApiError::internal("Failed to build auth cookie"))?;
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}
