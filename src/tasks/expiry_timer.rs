//! Deferred expiry of a running interval

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::debug;

use crate::{
    state::{ChatId, ExpiryHandle},
    timer::TimerEngine,
};

/// Spawn a task that reports expiry of run `run_id` after `duration_ms`.
///
/// The task fires at most once. Dropping the returned handle cancels it.
pub fn schedule_expiry(
    engine: Arc<TimerEngine>,
    chat: ChatId,
    run_id: u64,
    duration_ms: u64,
) -> ExpiryHandle {
    debug!("Scheduling expiry of run {} for chat {} in {}ms", run_id, chat, duration_ms);

    let task = tokio::spawn(async move {
        sleep(Duration::from_millis(duration_ms)).await;
        engine.on_expire(chat, run_id);
    });

    ExpiryHandle::new(task)
}
