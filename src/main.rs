//! Pomodoro Bot - A per-chat pomodoro timer served over HTTP
//!
//! This is the main entry point for the pomodoro-bot application.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_bot::{
    api::create_router, config::Config, services::Roster, state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_bot={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-bot v{}", env!("CARGO_PKG_VERSION"));

    let defaults = config
        .default_settings()
        .context("Invalid default timer settings")?;
    info!(
        "Configuration: host={}, port={}, work={}min, break={}min, long_break={}min, pomodoros={}",
        config.host, config.port, config.work, config.break_minutes, config.long_break,
        config.pomodoros
    );

    let roster = match &config.roster_file {
        Some(path) => Roster::load(path.clone())
            .await
            .with_context(|| format!("Failed to read roster file {}", path.display()))?,
        None => Roster::in_memory(),
    };

    let state = Arc::new(AppState::new(defaults, roster, config.port, config.host.clone()));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /chats/:chat_id/messages      - Send a chat command");
    info!("  GET  /chats/:chat_id/status        - Current timer state");
    info!("  GET  /chats/:chat_id/notifications - Stream of expiry notifications");
    info!("  GET  /health                       - Health check");

    // Notification streams never close on their own, so stop serving on the
    // signal instead of waiting for connections to drain. Timer state lives
    // in memory only; pending intervals end with the process.
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
