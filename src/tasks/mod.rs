//! Background tasks module
//!
//! Tasks spawned alongside the HTTP server, one per running interval.

pub mod expiry_timer;

// Re-export main functions
pub use expiry_timer::schedule_expiry;
