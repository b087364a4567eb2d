//! Error types for the timer core

use thiserror::Error;

use crate::state::ChatId;

/// Rejected timer settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("pomodoros before a long break must be at least 1")]
    ZeroPomodoros,

    #[error("{field} duration of {minutes} minutes is too large")]
    DurationOverflow { field: &'static str, minutes: u64 },
}

/// Failures of a single engine operation
#[derive(Error, Debug)]
pub enum EngineError {
    /// The chat never ran /start or /set
    #[error("chat {0} has no timer state")]
    NotInitialized(ChatId),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to lock timer store: {0}")]
    StateLock(String),
}
