//! Spread reader session handlers

use super::{api_error, require_user, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lumina_core::reader::{ReaderSession, ReaderTheme, SpreadView};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for a newly opened session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Uuid,
    pub view: SpreadView,
}

/// Response for a navigation request
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// Whether the request changed the navigator state
    pub changed: bool,
    pub view: SpreadView,
}

fn session_not_found(id: Uuid) -> ApiError {
    (StatusCode::NOT_FOUND, format!("Unknown reader session: {}", id))
}

/// Open a plain-text library book in a new spread reader session
pub async fn open_reader(
    State(state): State<AppState>,
    Path((publisher, id)): Path<(String, String)>,
) -> Result<Json<SessionResponse>, ApiError> {
    require_user(&state).await?;
    let book = state
        .storefront
        .library_book(&publisher, &id)
        .await
        .map_err(api_error)?;

    // Pagination of a long book is CPU-bound
    let budget = state.page_char_budget;
    let session = tokio::task::spawn_blocking(move || ReaderSession::open(&book, budget))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task failed: {}", e),
            )
        })?
        .map_err(api_error)?;

    let session_id = Uuid::new_v4();
    let view = session.view();
    state.sessions.write().await.insert(session_id, session);
    tracing::info!(%session_id, book_id = %id, pages = view.total_pages, "opened reader");

    Ok(Json(SessionResponse {
        session: session_id,
        view,
    }))
}

/// Current view of a session
pub async fn reader_view(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SpreadView>, ApiError> {
    require_user(&state).await?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(session.view()))
}

/// Apply a navigation request while holding the session write lock
async fn navigate(
    state: &AppState,
    session_id: Uuid,
    request: impl FnOnce(&mut ReaderSession) -> bool,
) -> Result<Json<NavigationResponse>, ApiError> {
    require_user(state).await?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    let changed = request(session);
    Ok(Json(NavigationResponse {
        changed,
        view: session.view(),
    }))
}

/// Start turning to the next spread
pub async fn reader_next(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NavigationResponse>, ApiError> {
    navigate(&state, session_id, ReaderSession::next).await
}

/// Start turning to the previous spread
pub async fn reader_prev(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NavigationResponse>, ApiError> {
    navigate(&state, session_id, ReaderSession::prev).await
}

/// Finish the running page turn
pub async fn reader_complete(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NavigationResponse>, ApiError> {
    navigate(&state, session_id, ReaderSession::complete_transition).await
}

/// Theme request body
#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: ReaderTheme,
}

/// Change the page colour scheme
pub async fn set_reader_theme(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<SpreadView>, ApiError> {
    require_user(&state).await?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.set_theme(request.theme);
    Ok(Json(session.view()))
}

/// Close a session
pub async fn close_reader(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user(&state).await?;
    state
        .sessions
        .write()
        .await
        .remove(&session_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| session_not_found(session_id))
}
