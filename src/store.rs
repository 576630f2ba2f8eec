use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use poise::serenity_prelude::UserId;
use tokio::sync::Mutex;
use tracing::info;

/// Errors raised by the birthday store
#[derive(Debug)]
pub enum StoreError {
    /// The store file exists but does not contain a valid JSON mapping.
    /// Fatal at startup: continuing would overwrite user data on the next save.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    Io(std::io::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Corrupt { path, source } => {
                write!(
                    f,
                    "birthday store {} is corrupt: {} (refusing to overwrite it)",
                    path.display(),
                    source
                )
            }
            StoreError::Io(e) => write!(f, "birthday store I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Corrupt { source, .. } => Some(source),
            StoreError::Io(e) => Some(e),
        }
    }
}

/// Durable mapping from member id to birthday string (`DD/MM` or `DD/MM/YY`),
/// mirrored 1:1 to a JSON file on every mutation.
///
/// All mutations run under one mutex that is held across the persist write,
/// so concurrent command invocations can never interleave a partial save.
#[derive(Clone)]
pub struct BirthdayStore {
    path: PathBuf,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl BirthdayStore {
    /// Load the store from disk. A missing file seeds an empty mapping;
    /// a malformed file is a fatal error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let store = Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        };
        Ok(store)
    }

    /// Register or overwrite a member's birthday and persist immediately
    pub async fn set(&self, member_id: UserId, date: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(member_id.to_string(), date.to_string());
        self.persist(&entries).await?;
        info!("Stored birthday {} for user {}", date, member_id);
        Ok(())
    }

    /// Remove a member's birthday, reporting whether one was present
    pub async fn remove(&self, member_id: UserId) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(&member_id.to_string()).is_none() {
            return Ok(false);
        }
        self.persist(&entries).await?;
        info!("Removed birthday for user {}", member_id);
        Ok(true)
    }

    /// Clone of the full mapping for read-only iteration during a cycle
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().await.clone()
    }

    /// Number of registered birthdays
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        // HashMap<String, String> serialization cannot fail, but keep the
        // error path honest rather than panicking in a running bot.
        let raw = serde_json::to_string(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(StoreError::Io)
    }
}
