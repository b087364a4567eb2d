//! Order of intervals within a pomodoro cycle

use crate::state::Task;

/// Task that follows `task`, with the updated count of completed pomodoros.
///
/// A work interval counts as one pomodoro; the work interval that completes
/// the cycle leads to a long break and resets the count. Breaks always lead
/// back to work without touching the count.
pub fn next(task: Task, pomodoros_done: u32, pomodoros_target: u32) -> (Task, u32) {
    match task {
        Task::Work if pomodoros_done.saturating_add(1) >= pomodoros_target => (Task::LongBreak, 0),
        Task::Work => (Task::Break, pomodoros_done + 1),
        Task::Break | Task::LongBreak => (Task::Work, pomodoros_done),
    }
}
