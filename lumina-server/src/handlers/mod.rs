//! Request handlers

mod auth;
mod epub;
mod reader;
mod storefront;
mod sync;

pub use auth::*;
pub use epub::*;
pub use reader::*;
pub use storefront::*;
pub use sync::*;

use crate::state::AppState;
use axum::{http::StatusCode, Json};
use lumina_core::storefront::User;
use lumina_core::{LuminaError, ReaderError, StoreError, StorefrontError};
use serde::Serialize;

/// Error returned by handlers
pub type ApiError = (StatusCode, String);

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Map a core error to a status code and message
pub fn api_error(err: impl Into<LuminaError>) -> ApiError {
    let err = err.into();
    let status = match &err {
        LuminaError::Storefront(
            StorefrontError::UnknownPublisher(_) | StorefrontError::UnknownBook(_),
        ) => StatusCode::NOT_FOUND,
        LuminaError::Storefront(_) => StatusCode::BAD_REQUEST,
        LuminaError::Reader(ReaderError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
        LuminaError::Reader(ReaderError::NotPlainText(_)) => StatusCode::CONFLICT,
        LuminaError::Store(StoreError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
        LuminaError::Store(_) | LuminaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    (status, err.to_string())
}

/// The signed-in user, or 401
pub async fn require_user(state: &AppState) -> Result<User, ApiError> {
    state
        .current_user()
        .await
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Not signed in".to_string()))
}
