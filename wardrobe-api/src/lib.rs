//! wardrobe-api library - wardrobe REST API and recommender
//!
//! CRUD over wardrobe items and collections plus rule-based outfit and
//! purchase recommendations.

use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod recommend;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Item store connection pool
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
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .merge(api::health_routes())
        .merge(api::wardrobe_routes())
        .merge(api::collection_routes())
        .merge(api::recommendation_routes())
        .fallback(api::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
