//! Simulated sign-in handlers

use super::{api_error, require_user, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use lumina_core::storefront::{login as sign_in, Credentials, User};
use lumina_core::types::Announcement;
use serde::{Deserialize, Serialize};

/// Query parameters for login
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Publisher whose pending push notification should be delivered
    #[serde(default = "default_publisher")]
    pub publisher: String,
}

fn default_publisher() -> String {
    "lumina".to_string()
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,

    /// Push notification delivered on this login, if any
    pub notification: Option<Announcement>,
}

/// Sign in with any credentials
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .storefront
        .publisher(&query.publisher)
        .map_err(api_error)?;

    let user = sign_in(&credentials);
    *state.user.write().await = Some(user.clone());

    let notification = state
        .storefront
        .take_pending_push(&query.publisher)
        .await
        .map_err(api_error)?;

    if let Some(announcement) = &notification {
        tracing::info!(id = %announcement.id, "delivering push notification");
        state.broadcast(ServerEvent::Notification {
            announcement: announcement.clone(),
        });
    }

    Ok(Json(LoginResponse {
        user,
        signed_in_at: Utc::now(),
        notification,
    }))
}

/// Sign out, closing every open reader session
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    *state.user.write().await = None;

    let mut sessions = state.sessions.write().await;
    if !sessions.is_empty() {
        tracing::info!(closed = sessions.len(), "closed reader sessions on logout");
        sessions.clear();
    }
    StatusCode::NO_CONTENT
}

/// Current user
pub async fn current_user(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    require_user(&state).await.map(Json)
}
