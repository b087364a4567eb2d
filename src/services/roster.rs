//! Roster of chats that ever ran /start

use std::{
    collections::HashSet,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tokio::{fs, io::AsyncWriteExt, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::state::ChatId;

/// Known chats, optionally mirrored to an append-only file with one id per line.
///
/// Recording is fire-and-forget; the timer never waits on it.
#[derive(Debug, Default)]
pub struct Roster {
    chats: Mutex<HashSet<ChatId>>,
    path: Option<PathBuf>,
}

impl Roster {
    /// Roster kept in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Roster backed by `path`, seeded with the ids already in it
    pub async fn load(path: PathBuf) -> std::io::Result<Self> {
        let chats = match fs::read_to_string(&path).await {
            Ok(contents) => parse_ids(&contents, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e),
        };
        info!("Loaded {} chats from roster {}", chats.len(), path.display());

        Ok(Self {
            chats: Mutex::new(chats),
            path: Some(path),
        })
    }

    /// Remember `chat`. Returns the write task when a new id is appended to the file.
    pub fn register(&self, chat: ChatId) -> Option<JoinHandle<()>> {
        let inserted = match self.chats.lock() {
            Ok(mut chats) => chats.insert(chat),
            Err(e) => {
                warn!("Failed to lock roster: {}", e);
                return None;
            }
        };
        if !inserted {
            return None;
        }

        debug!("Chat {} added to roster", chat);
        let path = self.path.clone()?;
        Some(tokio::spawn(async move {
            if let Err(e) = append_id(&path, chat).await {
                warn!("Failed to record chat {} in {}: {}", chat, path.display(), e);
            }
        }))
    }

    pub fn contains(&self, chat: ChatId) -> bool {
        self.chats
            .lock()
            .map(|chats| chats.contains(&chat))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.chats.lock().map(|chats| chats.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_ids(contents: &str, path: &Path) -> HashSet<ChatId> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.parse::<i64>() {
            Ok(id) => Some(ChatId(id)),
            Err(_) => {
                warn!("Skipping malformed roster line {:?} in {}", line, path.display());
                None
            }
        })
        .collect()
}

async fn append_id(path: &Path, chat: ChatId) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(format!("{}\n", chat).as_bytes()).await?;
    file.flush().await
}
