//! Pomodoro Bot - A per-chat pomodoro timer served over HTTP
//!
//! Each chat cycles through work, break and long break intervals. Chats
//! start, pause, skip and cancel intervals with slash commands and get a
//! push notification when an interval runs out.

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{EngineError, SettingsError};
pub use state::AppState;
pub use timer::TimerEngine;
pub use utils::signals::shutdown_signal;
