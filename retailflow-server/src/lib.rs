//! HTTP transport for the transfer engine.
//!
//! Thin glue only: handlers parse uploads, call into one shared
//! `TransferSession`, and translate engine errors to JSON error responses.
//! The session sits behind an async mutex, so concurrent requests against
//! the same process serialize instead of racing the shared snapshot.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use retailflow_engine::TransferSession;

pub mod api;

/// Uploads above this size are rejected with 413.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one dataset/analysis session this process serves.
    pub session: Arc<Mutex<TransferSession>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(TransferSession::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::health))
        .route("/upload", post(api::upload))
        .route("/analyze", post(api::analyze))
        .route("/stores", get(api::stores))
        .route("/export", get(api::export))
        .route("/template", get(api::template))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
