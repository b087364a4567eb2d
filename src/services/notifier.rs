//! Push notifications to chats

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::state::ChatId;

/// Outbound message that is not a reply to a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub chat_id: ChatId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Delivers pushes to a chat. Fire-and-forget: failures are logged by the
/// implementation and never reach the caller.
pub trait Notifier: Send + Sync {
    fn send(&self, chat: ChatId, text: String);
}

/// Publishes notifications on a broadcast channel for transport listeners
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Notifier for ChannelNotifier {
    fn send(&self, chat: ChatId, text: String) {
        let notification = Notification {
            chat_id: chat,
            text,
            timestamp: Utc::now(),
        };

        match self.tx.send(notification) {
            Ok(listeners) => debug!("Notification for chat {} sent to {} listeners", chat, listeners),
            Err(_) => warn!("No listeners connected, notification for chat {} dropped", chat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_subscribers() {
        let notifier = ChannelNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.send(ChatId(3), "Break is over".to_string());

        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.chat_id, ChatId(3));
        assert_eq!(notification.text, "Break is over");
    }

    #[test]
    fn send_without_listeners_is_not_an_error() {
        let notifier = ChannelNotifier::new(8);
        notifier.send(ChatId(3), "nobody hears this".to_string());
        assert_eq!(notifier.tx.receiver_count(), 0);
    }
}
