//! Routes chat commands to the timer engine

use std::sync::Arc;

use tracing::{debug, error};

use super::{
    commands::{Command, SetArgs},
    replies,
};
use crate::{
    error::EngineError,
    services::Roster,
    state::ChatId,
    timer::TimerEngine,
};

/// Turns inbound chat text into engine operations and text replies
pub struct Dispatcher {
    engine: Arc<TimerEngine>,
    roster: Arc<Roster>,
}

impl Dispatcher {
    pub fn new(engine: Arc<TimerEngine>, roster: Arc<Roster>) -> Self {
        Self { engine, roster }
    }

    pub fn engine(&self) -> &Arc<TimerEngine> {
        &self.engine
    }

    /// Reply to `text` from `chat`, or `None` if the text is not a command.
    ///
    /// Internal failures are logged and answered with a generic error.
    pub fn handle(&self, chat: ChatId, text: &str, from: Option<&str>) -> Option<String> {
        let command = Command::parse(text)?;
        debug!("Chat {} sent {:?}", chat, command);

        let reply = match self.execute(chat, command, from) {
            Ok(reply) => reply,
            Err(e) => {
                error!("Command from chat {} failed: {}", chat, e);
                replies::internal_error()
            }
        };
        Some(reply)
    }

    fn execute(
        &self,
        chat: ChatId,
        command: Command,
        from: Option<&str>,
    ) -> Result<String, EngineError> {
        let reply = match command {
            Command::Start => {
                self.engine.init(chat)?;
                // Roster bookkeeping must not hold up the reply
                let _ = self.roster.register(chat);
                replies::greeting(from)
            }
            Command::Help => replies::help(),
            Command::Set(args) => return self.configure(chat, &args),
            Command::Settings => replies::settings(&self.engine.settings(chat)?),
            Command::Info => replies::status(&self.engine.query(chat)?),
            Command::Go => replies::started(self.engine.start(chat)?),
            Command::Pause => replies::paused(self.engine.pause(chat)?),
            Command::Skip => replies::skipped(self.engine.skip(chat)?),
            Command::Cancel => {
                self.engine.cancel(chat)?;
                replies::cancelled()
            }
            Command::Unknown(name) => {
                debug!("Chat {} sent unknown command {:?}", chat, name);
                replies::unknown_command()
            }
        };
        Ok(reply)
    }

    fn configure(&self, chat: ChatId, args: &[String]) -> Result<String, EngineError> {
        let args = match SetArgs::parse(args) {
            Ok(args) => args,
            Err(e) => return Ok(replies::invalid_set_format(&e.to_string())),
        };

        match self.engine.configure(
            chat,
            args.work,
            args.break_minutes,
            args.long_break,
            args.pomodoros,
        ) {
            Ok(_) => Ok(replies::settings_changed()),
            Err(EngineError::Settings(e)) => Ok(replies::invalid_set_format(&e.to_string())),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::ChannelNotifier, state::Settings};

    const CHAT: ChatId = ChatId(9);

    fn dispatcher() -> Dispatcher {
        let notifier = Arc::new(ChannelNotifier::new(8));
        let engine = Arc::new(TimerEngine::new(Settings::default(), notifier));
        Dispatcher::new(engine, Arc::new(Roster::in_memory()))
    }

    fn reply(dispatcher: &Dispatcher, text: &str) -> String {
        dispatcher.handle(CHAT, text, Some("Ada")).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn start_greets_and_registers() {
        let dispatcher = dispatcher();
        assert!(reply(&dispatcher, "/start").starts_with("Hello, Ada"));
        assert!(dispatcher.roster.contains(CHAT));
        assert_eq!(reply(&dispatcher, "/info"), "Timer is not running\nCurrent task: work");
    }

    #[tokio::test(start_paused = true)]
    async fn ignores_plain_text() {
        assert_eq!(dispatcher().handle(CHAT, "good morning", None), None);
    }

    #[tokio::test(start_paused = true)]
    async fn uninitialized_chat_gets_generic_error() {
        let dispatcher = dispatcher();
        assert_eq!(reply(&dispatcher, "/go"), replies::internal_error());
        assert_eq!(reply(&dispatcher, "/settings"), replies::internal_error());
    }

    #[tokio::test(start_paused = true)]
    async fn set_then_settings() {
        let dispatcher = dispatcher();
        assert_eq!(reply(&dispatcher, "/set 25 10 30 4"), "Timer settings have been changed");
        assert!(reply(&dispatcher, "/settings").starts_with("Work: 25 minutes 0 seconds\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_set_leaves_state_alone() {
        let dispatcher = dispatcher();
        reply(&dispatcher, "/set 50 5 20 2");

        for text in ["/set 25 10", "/set a b c d", "/set 25 10 30 0"] {
            assert!(reply(&dispatcher, text).starts_with("Incorrect format"), "{text}");
        }
        assert!(reply(&dispatcher, "/settings").starts_with("Work: 50 minutes 0 seconds\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_before_go_is_reported() {
        let dispatcher = dispatcher();
        reply(&dispatcher, "/start");
        assert_eq!(reply(&dispatcher, "/pause"), "Timer is not running");
        assert_eq!(reply(&dispatcher, "/info"), "Timer is not running\nCurrent task: work");
    }

    #[tokio::test(start_paused = true)]
    async fn full_command_round() {
        let dispatcher = dispatcher();
        reply(&dispatcher, "/start");

        assert_eq!(
            reply(&dispatcher, "/go"),
            "Timer has been started\nCurrent task: work\n25 minutes 0 seconds remaining"
        );
        assert_eq!(reply(&dispatcher, "/go"), "Timer is already running");
        assert_eq!(reply(&dispatcher, "/pause"), "Timer paused");
        assert!(reply(&dispatcher, "/info").starts_with("Timer paused\nCurrent task: work"));
        assert_eq!(
            reply(&dispatcher, "/skip"),
            "Task work skipped\nType /go to start the next task"
        );
        assert_eq!(reply(&dispatcher, "/cancel"), "Task cancelled");
        assert_eq!(reply(&dispatcher, "/info"), "Timer is not running\nCurrent task: break");
        assert_eq!(reply(&dispatcher, "/nope"), replies::unknown_command());
    }
}
