//! EPUB reading position handlers
//!
//! EPUB rendering happens in the client's EPUB engine. The server only keeps
//! the engine's locator so reading resumes where it stopped.

use super::{api_error, require_user, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// Saved locator for a book
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    pub book_id: String,
    pub location: Option<String>,
}

/// Location update body
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub location: String,
}

/// Get the saved locator
pub async fn get_epub_location(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<LocationResponse>, ApiError> {
    require_user(&state).await?;
    let location = state
        .storefront
        .epub_location(&book_id)
        .await
        .map_err(api_error)?;
    Ok(Json(LocationResponse { book_id, location }))
}

/// Save the locator reported by the EPUB engine
pub async fn set_epub_location(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(request): Json<LocationRequest>,
) -> Result<StatusCode, ApiError> {
    require_user(&state).await?;
    state
        .storefront
        .set_epub_location(&book_id, &request.location)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
