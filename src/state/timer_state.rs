//! Timer state structure and management

use serde::{Deserialize, Serialize};
use tokio::{task::JoinHandle, time::Instant};

use super::{Settings, Task};
use crate::utils::time::duration_millis;

/// Cancellable handle of a scheduled expiry.
///
/// Dropping the handle aborts the sleeping task, so whatever owns the
/// handle decides how long the expiry may still fire.
#[derive(Debug)]
pub struct ExpiryHandle {
    task: JoinHandle<()>,
}

impl ExpiryHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Whether the scheduled task already ran or was aborted
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ExpiryHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One started interval, running or paused
#[derive(Debug)]
pub struct RunState {
    /// Distinguishes this run from any earlier or later one of the same chat
    pub run_id: u64,
    /// When the interval was last started or resumed
    pub start_time: Instant,
    /// Milliseconds the current run began counting down from
    pub initial_duration: u64,
    /// Milliseconds left at the last pause, zero while running
    pub pause_remaining: u64,
    /// Present iff the interval is counting down
    expiry: Option<ExpiryHandle>,
}

impl RunState {
    /// A run counting down `duration` milliseconds from `now`
    pub fn running(run_id: u64, now: Instant, duration: u64, expiry: ExpiryHandle) -> Self {
        Self {
            run_id,
            start_time: now,
            initial_duration: duration,
            pause_remaining: 0,
            expiry: Some(expiry),
        }
    }

    pub fn is_running(&self) -> bool {
        self.expiry.is_some()
    }

    /// Milliseconds left at `now`, never below zero
    pub fn remaining_at(&self, now: Instant) -> u64 {
        if self.is_running() {
            let elapsed = duration_millis(now.saturating_duration_since(self.start_time));
            self.initial_duration.saturating_sub(elapsed)
        } else {
            self.pause_remaining
        }
    }

    /// Stop counting down, cancelling the pending expiry.
    /// Returns the remaining milliseconds, or `None` if already paused.
    pub fn pause(&mut self, now: Instant) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let remaining = self.remaining_at(now);
        self.expiry = None;
        self.pause_remaining = remaining;
        Some(remaining)
    }
}

/// Everything the bot tracks for one chat
#[derive(Debug)]
pub struct TimerState {
    pub task: Task,
    /// Completed work intervals since the last long break
    pub pomodoros_done: u32,
    pub timer: Option<RunState>,
    pub settings: Settings,
}

impl TimerState {
    /// Fresh state at the first work interval
    pub fn new(settings: Settings) -> Self {
        Self {
            task: Task::Work,
            pomodoros_done: 0,
            timer: None,
            settings,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        match &self.timer {
            None => TimerPhase::Idle,
            Some(run) if run.is_running() => TimerPhase::Running,
            Some(_) => TimerPhase::Paused,
        }
    }

    /// Read-only view of the state at `now`
    pub fn status(&self, now: Instant) -> TimerStatus {
        TimerStatus {
            task: self.task,
            pomodoros_done: self.pomodoros_done,
            phase: self.phase(),
            remaining_ms: self.timer.as_ref().map(|run| run.remaining_at(now)),
        }
    }
}

/// Whether an interval is counting down, paused, or not started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Snapshot returned by `/info` and the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub task: Task,
    pub pomodoros_done: u32,
    pub phase: TimerPhase,
    pub remaining_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn idle_handle() -> ExpiryHandle {
        ExpiryHandle::new(tokio::spawn(futures::future::pending()))
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_counts_down_while_running() {
        let now = Instant::now();
        let run = RunState::running(1, now, 10_000, idle_handle());

        assert_eq!(run.remaining_at(now), 10_000);
        assert_eq!(run.remaining_at(now + Duration::from_millis(2_500)), 7_500);
        assert_eq!(run.remaining_at(now + Duration::from_secs(60)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_remaining_and_aborts_expiry() {
        let now = Instant::now();
        let mut run = RunState::running(1, now, 10_000, idle_handle());

        assert_eq!(run.pause(now + Duration::from_secs(4)), Some(6_000));
        assert!(!run.is_running());
        assert_eq!(run.remaining_at(now + Duration::from_secs(100)), 6_000);
        assert_eq!(run.pause(now + Duration::from_secs(5)), None);
        assert_eq!(run.pause_remaining, 6_000);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_aborts_task() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = ExpiryHandle::new(tokio::spawn(async move {
            let _tx = tx;
            futures::future::pending::<()>().await
        }));
        assert!(!handle.is_finished());

        drop(handle);
        assert!(rx.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn status_reflects_phase() {
        let now = Instant::now();
        let mut state = TimerState::new(Settings::default());
        assert_eq!(state.status(now).phase, TimerPhase::Idle);
        assert_eq!(state.status(now).remaining_ms, None);

        state.timer = Some(RunState::running(7, now, 1_000, idle_handle()));
        assert_eq!(state.phase(), TimerPhase::Running);

        state.timer.as_mut().unwrap().pause(now);
        let status = state.status(now);
        assert_eq!(status.phase, TimerPhase::Paused);
        assert_eq!(status.remaining_ms, Some(1_000));
        assert_eq!(status.task, Task::Work);
    }
}
