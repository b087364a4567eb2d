//! Process-wide store of per-chat timer state

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use super::{ChatId, TimerState};
use crate::error::EngineError;

/// Owns the `TimerState` of every chat.
///
/// Callers borrow a chat's state for the duration of one closure; the lock
/// is never held across an await point.
#[derive(Debug, Default)]
pub struct TimerStore {
    states: Mutex<HashMap<ChatId, TimerState>>,
}

impl TimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ChatId, TimerState>>, EngineError> {
        self.states
            .lock()
            .map_err(|e| EngineError::StateLock(e.to_string()))
    }

    /// Store `state` for `chat`, returning whatever it replaced
    pub fn put(&self, chat: ChatId, state: TimerState) -> Result<Option<TimerState>, EngineError> {
        Ok(self.lock()?.insert(chat, state))
    }

    pub fn remove(&self, chat: ChatId) -> Result<Option<TimerState>, EngineError> {
        Ok(self.lock()?.remove(&chat))
    }

    pub fn contains(&self, chat: ChatId) -> Result<bool, EngineError> {
        Ok(self.lock()?.contains_key(&chat))
    }

    pub fn len(&self) -> Result<usize, EngineError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.lock()?.is_empty())
    }

    /// Run `f` against the chat's state; fails if the chat was never initialized
    pub fn update<R, F>(&self, chat: ChatId, f: F) -> Result<R, EngineError>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut states = self.lock()?;
        let state = states
            .get_mut(&chat)
            .ok_or(EngineError::NotInitialized(chat))?;
        Ok(f(state))
    }
}
