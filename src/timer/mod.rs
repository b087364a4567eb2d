//! Timer core
//!
//! The task sequencer and the per-chat timer engine built on it.

pub mod engine;
pub mod sequencer;

// Re-export main types
pub use engine::{Advance, PauseOutcome, StartOutcome, TimerEngine};
