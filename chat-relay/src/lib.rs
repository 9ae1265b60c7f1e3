//! chat-relay library - room-based WebSocket chat
//!
//! Clients join a named room and every chat message is relayed to all
//! connections currently in that room.

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub mod protocol;
pub mod rooms;
pub mod session;

use rooms::RoomRegistry;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct RelayState {
    pub rooms: Arc<RoomRegistry>,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub rooms: usize,
}

/// GET /health
pub async fn health_check(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "chat-relay".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rooms: state.rooms.room_count().await,
    })
}

/// GET / and GET /ws - WebSocket upgrade
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> Response {
    ws.on_upgrade(move |socket| session::run_session(socket, state.rooms))
}

/// Build application router
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
