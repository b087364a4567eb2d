//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{error::SettingsError, state::Settings};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-bot")]
#[command(about = "A per-chat pomodoro timer bot served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Default work interval in minutes
    #[arg(short, long, default_value = "25")]
    pub work: u64,

    /// Default break in minutes
    #[arg(short, long = "break-minutes", default_value = "10")]
    pub break_minutes: u64,

    /// Default long break in minutes
    #[arg(short, long, default_value = "30")]
    pub long_break: u64,

    /// Default number of work intervals before a long break
    #[arg(long, default_value = "4")]
    pub pomodoros: u32,

    /// File recording every chat that ran /start, one id per line
    #[arg(long)]
    pub roster_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings a chat gets on /start, validated like /set
    pub fn default_settings(&self) -> Result<Settings, SettingsError> {
        Settings::from_minutes(self.work, self.break_minutes, self.long_break, self.pomodoros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let config = Config::try_parse_from(["pomodoro-bot"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.default_settings(), Ok(Settings::default()));
        assert!(config.roster_file.is_none());
    }

    #[test]
    fn overrides_defaults() {
        let config = Config::try_parse_from([
            "pomodoro-bot", "-w", "50", "--break-minutes", "5", "-l", "20", "--pomodoros", "2",
            "--roster-file", "/tmp/chats.txt", "-v",
        ])
        .unwrap();

        let settings = config.default_settings().unwrap();
        assert_eq!(settings.work_ms, 50 * 60 * 1000);
        assert_eq!(settings.pomodoros, 2);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.roster_file, Some(PathBuf::from("/tmp/chats.txt")));
    }

    #[test]
    fn rejects_zero_pomodoros() {
        let config = Config::try_parse_from(["pomodoro-bot", "--pomodoros", "0"]).unwrap();
        assert_eq!(config.default_settings(), Err(SettingsError::ZeroPomodoros));
    }
}
