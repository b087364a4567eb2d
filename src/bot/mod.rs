//! Chat command handling
//!
//! Parses slash commands, runs them against the timer engine, and renders
//! the text replies.

pub mod commands;
pub mod dispatcher;
pub mod replies;

pub use commands::{Command, SetArgs};
pub use dispatcher::Dispatcher;
