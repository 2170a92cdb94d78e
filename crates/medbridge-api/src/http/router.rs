//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/`. Stored audio is served read-only
//! under `/media/` straight from the data directory.
//! Middleware: CORS (wide open, the frontend runs on its own origin
//! during development) and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let media_dir = state.media_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/messages/send", post(handlers::message::send_message))
        .route("/messages/search", get(handlers::search::search_messages))
        .route("/audio/upload", post(handlers::audio::upload_audio))
        .route("/summary/generate", post(handlers::summary::generate_summary));

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .nest_service("/media", ServeDir::new(&media_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - API self-description for anyone poking at the root.
async fn api_info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Doctor-Patient Translation Assistant API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "send_message": "/api/messages/send",
            "upload_audio": "/api/audio/upload",
            "generate_summary": "/api/summary/generate",
            "search_messages": "/api/messages/search?q=keyword",
        },
        "docs": "See README.md for API documentation",
    }))
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
