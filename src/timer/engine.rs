//! Per-chat timer state machine
//!
//! A chat's timer is in one of three phases:
//!
//! ```text
//! Idle --go--> Running --pause--> Paused --go--> Running
//!   ^             |                  |
//!   +-- skip / cancel / expiry ------+
//! ```
//!
//! Remaining time is derived from the monotonic clock at the moment it is
//! needed. While running, the only pending work is the expiry task owned by
//! the chat's `RunState`; leaving the running phase drops that task.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::sequencer;
use crate::{
    error::EngineError,
    services::Notifier,
    state::{ChatId, RunState, Settings, Task, TimerState, TimerStatus, TimerStore},
    tasks::schedule_expiry,
};

/// Result of `/go`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StartOutcome {
    Started { task: Task, remaining_ms: u64, resumed: bool },
    AlreadyRunning { task: Task },
}

/// Result of `/pause`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PauseOutcome {
    Paused { task: Task, remaining_ms: u64 },
    NotRunning,
}

/// Result of `/skip` and of an expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advance {
    pub finished: Task,
    pub next: Task,
    pub pomodoros_done: u32,
}

pub struct TimerEngine {
    store: TimerStore,
    notifier: Arc<dyn Notifier>,
    defaults: Settings,
    next_run_id: AtomicU64,
}

impl TimerEngine {
    pub fn new(defaults: Settings, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: TimerStore::new(),
            notifier,
            defaults,
            next_run_id: AtomicU64::new(1),
        }
    }

    /// `/start`: reset the chat to the default settings at the first work interval
    pub fn init(&self, chat: ChatId) -> Result<(), EngineError> {
        self.replace(chat, TimerState::new(self.defaults))?;
        info!("Chat {} initialized with default settings", chat);
        Ok(())
    }

    /// `/set`: validate minutes and apply them, restarting the cycle
    pub fn configure(
        &self,
        chat: ChatId,
        work: u64,
        break_minutes: u64,
        long_break: u64,
        pomodoros: u32,
    ) -> Result<Settings, EngineError> {
        let settings = Settings::from_minutes(work, break_minutes, long_break, pomodoros)?;
        self.apply_settings(chat, settings)?;
        Ok(settings)
    }

    /// Replace the chat's settings and restart the cycle at work
    pub fn apply_settings(&self, chat: ChatId, settings: Settings) -> Result<(), EngineError> {
        self.replace(chat, TimerState::new(settings))?;
        info!("Chat {} settings changed to {:?}", chat, settings);
        Ok(())
    }

    fn replace(&self, chat: ChatId, state: TimerState) -> Result<(), EngineError> {
        // Dropping the previous state cancels its pending expiry, if any
        if let Some(previous) = self.store.put(chat, state)? {
            if previous.timer.as_ref().is_some_and(RunState::is_running) {
                debug!("Chat {} pending expiry cancelled by reset", chat);
            }
        }
        Ok(())
    }

    /// `/settings`
    pub fn settings(&self, chat: ChatId) -> Result<Settings, EngineError> {
        self.store.update(chat, |state| state.settings)
    }

    /// `/info`
    pub fn query(&self, chat: ChatId) -> Result<TimerStatus, EngineError> {
        let now = Instant::now();
        self.store.update(chat, |state| state.status(now))
    }

    /// `/go`: start the current task, or resume it if paused
    pub fn start(self: &Arc<Self>, chat: ChatId) -> Result<StartOutcome, EngineError> {
        self.store.update(chat, |state| {
            if state.timer.as_ref().is_some_and(RunState::is_running) {
                return StartOutcome::AlreadyRunning { task: state.task };
            }

            let resumed = state.timer.is_some();
            let duration = match &state.timer {
                Some(run) => run.pause_remaining,
                None => state.settings.duration_of(state.task),
            };

            let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);
            let expiry = schedule_expiry(Arc::clone(self), chat, run_id, duration);
            state.timer = Some(RunState::running(run_id, Instant::now(), duration, expiry));

            info!(
                "Chat {} {} {} with {}ms remaining",
                chat,
                if resumed { "resumed" } else { "started" },
                state.task,
                duration
            );
            StartOutcome::Started {
                task: state.task,
                remaining_ms: duration,
                resumed,
            }
        })
    }

    /// `/pause`
    pub fn pause(&self, chat: ChatId) -> Result<PauseOutcome, EngineError> {
        let now = Instant::now();
        self.store.update(chat, |state| {
            let task = state.task;
            match state.timer.as_mut().and_then(|run| run.pause(now)) {
                Some(remaining_ms) => {
                    info!("Chat {} paused {} with {}ms remaining", chat, task, remaining_ms);
                    PauseOutcome::Paused { task, remaining_ms }
                }
                None => PauseOutcome::NotRunning,
            }
        })
    }

    /// `/skip`: move on to the next task from any phase
    pub fn skip(&self, chat: ChatId) -> Result<Advance, EngineError> {
        let advance = self.store.update(chat, advance_task)?;
        info!("Chat {} skipped {}, next is {}", chat, advance.finished, advance.next);
        Ok(advance)
    }

    /// `/cancel`: drop the current run but stay on the same task
    pub fn cancel(&self, chat: ChatId) -> Result<Task, EngineError> {
        self.store.update(chat, |state| {
            if state.timer.take().is_some() {
                info!("Chat {} cancelled {}", chat, state.task);
            }
            state.task
        })
    }

    /// Called by the expiry task of run `run_id` once its duration elapsed.
    ///
    /// Firings that do not belong to the chat's current running interval are
    /// ignored.
    pub fn on_expire(&self, chat: ChatId, run_id: u64) {
        let result = self.store.update(chat, |state| {
            let current = state
                .timer
                .as_ref()
                .is_some_and(|run| run.run_id == run_id && run.is_running());
            // This may drop the handle of the very task calling us; the abort
            // only lands at its next await, and it has none left.
            current.then(|| advance_task(state))
        });

        match result {
            Ok(Some(advance)) => {
                info!("Chat {} finished {}, next is {}", chat, advance.finished, advance.next);
                self.notifier.send(
                    chat,
                    format!(
                        "{}\nType /go to start the next task",
                        advance.finished.expiry_message()
                    ),
                );
            }
            Ok(None) => warn!("Ignoring stale expiry of run {} for chat {}", run_id, chat),
            Err(e) => warn!("Expiry of run {} for chat {} dropped: {}", run_id, chat, e),
        }
    }
}

fn advance_task(state: &mut TimerState) -> Advance {
    let finished = state.task;
    let (next, pomodoros_done) =
        sequencer::next(state.task, state.pomodoros_done, state.settings.pomodoros);
    state.task = next;
    state.pomodoros_done = pomodoros_done;
    state.timer = None;
    Advance {
        finished,
        next,
        pomodoros_done,
    }
}
