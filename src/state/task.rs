//! The three kinds of interval a chat cycles through

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interval the chat is currently on, whether running, paused or not started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Work,
    Break,
    LongBreak,
}

impl Task {
    /// Human readable name used in replies
    pub fn label(self) -> &'static str {
        match self {
            Task::Work => "work",
            Task::Break => "break",
            Task::LongBreak => "long break",
        }
    }

    /// Message pushed to the chat when an interval of this kind runs out
    pub fn expiry_message(self) -> &'static str {
        match self {
            Task::Work => "Stop working for a while",
            Task::Break => "Break is over",
            Task::LongBreak => "Long break is over",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
