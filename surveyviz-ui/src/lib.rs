//! surveyviz-ui library - survey upload and visualization web application
//!
//! Request flow is strictly upload → validate → persist, or query → render.
//! There is no background work and no state outside the database.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod charts;
pub mod db;
pub mod ingest;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/", get(api::upload_form).post(api::upload_dataset))
        .route(
            "/secinajumi",
            get(api::conclusions_page).post(api::conclusions_page),
        )
        .route("/data", get(api::view_data))
        .route("/clear_data", post(api::clear_data))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(api::upload::MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
