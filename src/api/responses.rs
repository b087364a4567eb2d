//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ChatId, Settings, TimerStatus};

/// Inbound chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub text: String,
    /// Display name of the sender, used in the greeting
    #[serde(default)]
    pub from: Option<String>,
}

/// Bot reply to a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub chat_id: ChatId,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}

impl ReplyResponse {
    pub fn new(chat_id: ChatId, reply: String) -> Self {
        Self {
            chat_id,
            reply,
            timestamp: Utc::now(),
        }
    }
}

/// Structured timer state of one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub chat_id: ChatId,
    #[serde(flatten)]
    pub status: TimerStatus,
    pub settings: Settings,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
