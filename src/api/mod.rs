//! HTTP API module
//!
//! Stands in for the chat transport: messages come in as POST requests, and
//! expiry pushes go out as server-sent events.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chats/:chat_id/messages", post(message_handler))
        .route("/chats/:chat_id/status", get(status_handler))
        .route("/chats/:chat_id/notifications", get(notifications_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
