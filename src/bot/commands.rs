//! Parsing of inbound chat commands

use thiserror::Error;

/// A slash command sent by a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Raw arguments, validated by `SetArgs::parse`
    Set(Vec<String>),
    Settings,
    Info,
    Go,
    Pause,
    Skip,
    Cancel,
    Unknown(String),
}

impl Command {
    /// Parse `/name args...`. Text that is not a command yields `None`.
    ///
    /// A `@botname` suffix on the command name is ignored, so `/go@pomo_bot`
    /// works in group chats.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix('/')?;
        let mut tokens = rest.split_whitespace();
        let head = tokens.next().unwrap_or_default();
        let name = head.split('@').next().unwrap_or_default();

        Some(match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "set" => Command::Set(tokens.map(str::to_string).collect()),
            "settings" => Command::Settings,
            "info" => Command::Info,
            "go" => Command::Go,
            "pause" => Command::Pause,
            "skip" => Command::Skip,
            "cancel" => Command::Cancel,
            other => Command::Unknown(other.to_string()),
        })
    }
}

/// Why `/set` arguments were rejected before reaching the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetArgsError {
    #[error("expected 4 values, got {0}")]
    TooFew(usize),

    #[error("{0:?} is not a whole non-negative number")]
    NotANumber(String),
}

/// Arguments of `/set %work %break %long_break %pomodoros`, durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetArgs {
    pub work: u64,
    pub break_minutes: u64,
    pub long_break: u64,
    pub pomodoros: u32,
}

impl SetArgs {
    /// Every argument must be numeric; anything after the fourth is ignored
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, SetArgsError> {
        let values = args
            .iter()
            .map(|arg| {
                let arg = arg.as_ref();
                arg.parse::<u64>()
                    .map_err(|_| SetArgsError::NotANumber(arg.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [work, break_minutes, long_break, pomodoros] = match values.as_slice() {
            &[a, b, c, d, ..] => [a, b, c, d],
            _ => return Err(SetArgsError::TooFew(values.len())),
        };
        let pomodoros = u32::try_from(pomodoros)
            .map_err(|_| SetArgsError::NotANumber(args[3].as_ref().to_string()))?;

        Ok(Self {
            work,
            break_minutes,
            long_break,
            pomodoros,
        })
    }
}
