//! External collaborators module
//!
//! Side effects the timer core hands off: pushing notifications to chats and
//! recording the roster of known chats.

pub mod notifier;
pub mod roster;

// Re-export main types
pub use notifier::{ChannelNotifier, Notification, Notifier};
pub use roster::Roster;
