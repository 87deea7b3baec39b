//! Event log persistence
//!
//! The `EventStore` trait is the only seam between the recorder/aggregator
//! and wherever the log lives. Two backends:
//!
//! - `JsonFileStore`: one pretty-printed JSON array on disk
//! - `MemoryStore`: process-local, for tests and benchmarks

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::EventLog;

/// Whole-log load/save backend
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Load the persisted log. A store that has never been written loads as empty.
    async fn load(&self) -> StorageResult<EventLog>;

    /// Replace the persisted log with `log`
    async fn save(&self, log: &EventLog) -> StorageResult<()>;

    /// Human-readable location, for logs and health output
    fn describe(&self) -> String;

    /// Whether the backend can currently accept writes
    async fn is_ready(&self) -> bool {
        true
    }

    /// Load the log, degrading any failure to an empty log
    ///
    /// Read failures are never propagated from here; they are logged and the
    /// caller proceeds as on first run.
    async fn load_or_empty(&self) -> EventLog {
        match self.load().await {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!(
                    store = %self.describe(),
                    error = %e,
                    "Event log unreadable, treating as empty"
                );
                EventLog::new()
            }
        }
    }
}

/// Event log stored as a single JSON document
///
/// Saves go through a sibling temp file followed by a rename, so a reader
/// sees either the previous or the new log, never a torn write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn load(&self) -> StorageResult<EventLog> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No event log yet");
                return Ok(EventLog::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corruption(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, log: &EventLog) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(log)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, content).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::debug!(path = ?self.path, events = log.len(), "Event log saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn is_ready(&self) -> bool {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await.is_ok()
            }
            _ => true,
        }
    }
}

/// In-process event log
#[derive(Debug, Default)]
pub struct MemoryStore {
    log: RwLock<EventLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: EventLog) -> Self {
        Self {
            log: RwLock::new(log),
        }
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn load(&self) -> StorageResult<EventLog> {
        Ok(self.log.read().await.clone())
    }

    async fn save(&self, log: &EventLog) -> StorageResult<()> {
        *self.log.write().await = log.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
