// SPDX-License-Identifier: MIT

//! Kakao login, token refresh, logout and current-user routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/kakao", post(kakao_login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
}

/// Routes mounted behind the auth middleware.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/me", get(current_user))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoLoginRequest {
    access_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    refresh_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

/// Exchange a Kakao access token for a first-party session.
async fn kakao_login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KakaoLoginRequest>,
) -> Result<Json<TokenResponse>> {
    let pair = state.session.login(&request.access_token).await?;
    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Rotate a refresh token into a new token pair.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    let pair = state.session.refresh(&request.refresh_token).await?;
    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Delete the stored refresh token.
async fn logout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogoutRequest>,
) -> Result<StatusCode> {
    state.session.logout(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// Resolve the authenticated principal to its user record.
async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<User>> {
    state
        .session
        .current_user(auth_user.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {}", auth_user.user_id)))
}
