//! State management module
//!
//! Per-chat timer state, its settings, and the store that owns it.

pub mod app_state;
pub mod chat_id;
pub mod settings;
pub mod store;
pub mod task;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use chat_id::ChatId;
pub use settings::Settings;
pub use store::TimerStore;
pub use task::Task;
pub use timer_state::{ExpiryHandle, RunState, TimerPhase, TimerState, TimerStatus};
