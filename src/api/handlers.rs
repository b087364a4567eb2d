//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, warn};

use super::responses::{HealthResponse, MessageRequest, ReplyResponse, StatusResponse};
use crate::{
    error::EngineError,
    state::{AppState, ChatId},
};

/// Handle POST /chats/:chat_id/messages - Run a chat command
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
    Json(request): Json<MessageRequest>,
) -> Response {
    let chat = ChatId(chat_id);

    match state
        .dispatcher
        .handle(chat, &request.text, request.from.as_deref())
    {
        Some(reply) => Json(ReplyResponse::new(chat, reply)).into_response(),
        None => {
            debug!("Chat {} sent a non-command message, ignoring", chat);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Handle GET /chats/:chat_id/status - Structured timer state
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let chat = ChatId(chat_id);
    let engine = state.engine();

    let result = engine
        .query(chat)
        .and_then(|status| Ok((status, engine.settings(chat)?)));

    match result {
        Ok((status, settings)) => Ok(Json(StatusResponse {
            chat_id: chat,
            status,
            settings,
        })),
        Err(EngineError::NotInitialized(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to get status of chat {}: {}", chat, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /chats/:chat_id/notifications - Stream expiry pushes as SSE
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let chat = ChatId(chat_id);
    let rx = state.notifier.subscribe();
    debug!("Listener attached to notifications of chat {}", chat);

    let events = stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notification) if notification.chat_id == chat => {
                    let event = Event::default()
                        .event("notification")
                        .json_data(&notification);
                    return Some((event, rx));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Listener of chat {} lagged, {} notifications skipped", chat, skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
