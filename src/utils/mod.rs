//! Utility functions module
//!
//! Time formatting helpers and process signal handling.

pub mod signals;
pub mod time;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time::{format_millis, minutes_to_millis};
