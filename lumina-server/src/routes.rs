//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Origins allowed when `LUMINA_CORS_ORIGINS` is unset
const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Build the CORS layer from an origin setting: `*`, a comma-separated
/// list, or `None` for the local development origins
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let allow_origin = match origins {
        Some("*") => AllowOrigin::any(),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        None => AllowOrigin::list(DEV_ORIGINS.iter().copied().map(HeaderValue::from_static)),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(std::env::var("LUMINA_CORS_ORIGINS").ok().as_deref());

    let api_routes = Router::new()
        // Simulated auth
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/me", get(handlers::current_user))
        // Publishers and their storefronts
        .route("/publishers", get(handlers::list_publishers))
        .route("/publishers/:publisher", get(handlers::get_publisher))
        .route("/publishers/:publisher/store", get(handlers::store_books))
        .route(
            "/publishers/:publisher/library",
            get(handlers::library_books).post(handlers::upload_book),
        )
        .route(
            "/publishers/:publisher/books/:id/purchase",
            post(handlers::purchase_book),
        )
        .route(
            "/publishers/:publisher/books/:id/gift",
            post(handlers::gift_book),
        )
        .route(
            "/publishers/:publisher/books/:id/read",
            post(handlers::open_reader),
        )
        .route(
            "/publishers/:publisher/announcements",
            get(handlers::list_announcements),
        )
        .route(
            "/announcements/:id/dismiss",
            post(handlers::dismiss_announcement),
        )
        .route("/account", get(handlers::account))
        // Spread reader sessions
        .route(
            "/reader/:session",
            get(handlers::reader_view).delete(handlers::close_reader),
        )
        .route("/reader/:session/next", post(handlers::reader_next))
        .route("/reader/:session/prev", post(handlers::reader_prev))
        .route("/reader/:session/complete", post(handlers::reader_complete))
        .route("/reader/:session/theme", put(handlers::set_reader_theme))
        // EPUB bookmarks
        .route(
            "/epub/:book_id/location",
            get(handlers::get_epub_location).put(handlers::set_epub_location),
        )
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
