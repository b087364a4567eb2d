//! Per-chat timer settings

use serde::{Deserialize, Serialize};

use super::Task;
use crate::{error::SettingsError, utils::minutes_to_millis};

/// Interval lengths in milliseconds and the number of work intervals
/// before a long break. `pomodoros` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub work_ms: u64,
    pub break_ms: u64,
    pub long_break_ms: u64,
    pub pomodoros: u32,
}

impl Settings {
    /// Build settings from whole minutes, as typed by the user
    pub fn from_minutes(
        work: u64,
        break_minutes: u64,
        long_break: u64,
        pomodoros: u32,
    ) -> Result<Self, SettingsError> {
        if pomodoros == 0 {
            return Err(SettingsError::ZeroPomodoros);
        }

        let millis = |field: &'static str, minutes: u64| {
            minutes_to_millis(minutes).ok_or(SettingsError::DurationOverflow { field, minutes })
        };

        Ok(Self {
            work_ms: millis("work", work)?,
            break_ms: millis("break", break_minutes)?,
            long_break_ms: millis("long break", long_break)?,
            pomodoros,
        })
    }

    /// Full length of an interval of the given kind
    pub fn duration_of(&self, task: Task) -> u64 {
        match task {
            Task::Work => self.work_ms,
            Task::Break => self.break_ms,
            Task::LongBreak => self.long_break_ms,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_ms: 25 * 60 * 1000,
            break_ms: 10 * 60 * 1000,
            long_break_ms: 30 * 60 * 1000,
            pomodoros: 4,
        }
    }
}
