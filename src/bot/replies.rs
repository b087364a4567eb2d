//! Plain-text replies sent back to chats

use crate::{
    state::{Settings, TimerPhase, TimerStatus},
    timer::{Advance, PauseOutcome, StartOutcome},
    utils::format_millis,
};

const NEXT_TASK_HINT: &str = "Type /go to start the next task";

pub fn greeting(name: Option<&str>) -> String {
    format!(
        "Hello, {} 🍅\n\
         I'm a pomodoro timer bot created to organize workflow using the pomodoro technique. \
         It alternates focused work with short breaks, and takes a long break after a few \
         rounds of work.\n\n\
         Type /help to get the list of available commands",
        name.unwrap_or("stranger")
    )
}

pub fn help() -> String {
    [
        "/set - change work, break, long break duration and pomodoros count: /set 25 10 30 4",
        "/settings - current timer settings",
        "/info - current timer state",
        "/go - start current task",
        "/pause - pause current task",
        "/skip - skip current task",
        "/cancel - cancel current task",
    ]
    .join("\n")
}

/// Usage reminder for a rejected `/set`, with the reason it was rejected
pub fn invalid_set_format(reason: &str) -> String {
    format!(
        "Incorrect format: {}\n\
         Type the command in the correct format\n\
         /set %work %break %long_break %pomodoros",
        reason
    )
}

pub fn settings_changed() -> String {
    "Timer settings have been changed".to_string()
}

pub fn settings(settings: &Settings) -> String {
    format!(
        "Work: {}\nBreak: {}\nLong break: {}\nPomodoros before long break: {}",
        format_millis(settings.work_ms),
        format_millis(settings.break_ms),
        format_millis(settings.long_break_ms),
        settings.pomodoros
    )
}

pub fn status(status: &TimerStatus) -> String {
    let remaining = format_millis(status.remaining_ms.unwrap_or_default());
    match status.phase {
        TimerPhase::Idle => format!("Timer is not running\nCurrent task: {}", status.task),
        TimerPhase::Running => format!(
            "Timer is running\nCurrent task: {}\nTime remaining: {}",
            status.task, remaining
        ),
        TimerPhase::Paused => format!(
            "Timer paused\nCurrent task: {}\nTime remaining: {}",
            status.task, remaining
        ),
    }
}

pub fn started(outcome: StartOutcome) -> String {
    match outcome {
        StartOutcome::Started {
            task,
            remaining_ms,
            resumed,
        } => format!(
            "Timer has been {}\nCurrent task: {}\n{} remaining",
            if resumed { "resumed" } else { "started" },
            task,
            format_millis(remaining_ms)
        ),
        StartOutcome::AlreadyRunning { .. } => "Timer is already running".to_string(),
    }
}

pub fn paused(outcome: PauseOutcome) -> String {
    match outcome {
        PauseOutcome::Paused { .. } => "Timer paused".to_string(),
        PauseOutcome::NotRunning => "Timer is not running".to_string(),
    }
}

pub fn skipped(advance: Advance) -> String {
    format!("Task {} skipped\n{}", advance.finished, NEXT_TASK_HINT)
}

pub fn cancelled() -> String {
    "Task cancelled".to_string()
}

pub fn unknown_command() -> String {
    "This command does not exist\nType /help to get the list of available commands".to_string()
}

pub fn internal_error() -> String {
    "Error occurred when processing this command\nTry to restart the bot by /start command"
        .to_string()
}
