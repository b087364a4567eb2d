//! Main application state shared by the HTTP handlers

use std::{sync::Arc, time::Instant};

use super::Settings;
use crate::{
    bot::Dispatcher,
    services::{ChannelNotifier, Roster},
    timer::TimerEngine,
};

/// Notifications buffered per listener before slow listeners start lagging
const NOTIFICATION_CAPACITY: usize = 256;

/// Everything the HTTP layer needs: the dispatcher and its engine, the
/// notification channel, and server metadata
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub notifier: ChannelNotifier,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Wire up the engine with `defaults` for /start and the given roster
    pub fn new(defaults: Settings, roster: Roster, port: u16, host: String) -> Self {
        let notifier = ChannelNotifier::new(NOTIFICATION_CAPACITY);
        let engine = Arc::new(TimerEngine::new(defaults, Arc::new(notifier.clone())));

        Self {
            dispatcher: Dispatcher::new(engine, Arc::new(roster)),
            notifier,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    pub fn engine(&self) -> &Arc<TimerEngine> {
        self.dispatcher.engine()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
