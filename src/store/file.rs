//! JSON file-backed event store
//!
//! Persists the full event collection as a JSON document. Every committed
//! mutation rewrites the file atomically (temp file + rename), so a crash
//! mid-write never leaves a corrupt document behind.

use crate::error::{EventError, Result};
use crate::store::{EventFeed, EventIndex, EventStore, FeedRegistry, StoreInfo};
use crate::types::{Event, EventDraft, EventId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Configuration for a [`FileStore`]
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Path of the JSON document holding the collection
    pub path: PathBuf,

    /// Pretty-print the document (human-readable, slightly larger)
    pub pretty: bool,
}

impl FileConfig {
    /// Config with pretty-printing enabled, the default for local files
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }
}

/// File-backed event store
///
/// Loads the collection on open and keeps it in memory; reads never touch
/// the disk afterwards. A missing file opens as an empty store.
pub struct FileStore {
    config: FileConfig,
    index: RwLock<EventIndex>,
    feeds: FeedRegistry,
}

impl FileStore {
    /// Open a store at the given path, loading any existing collection
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(FileConfig::new(path))
    }

    /// Open a store with explicit configuration
    pub fn with_config(config: FileConfig) -> Result<Self> {
        let events = load_events(&config.path)?;
        tracing::debug!(
            path = %config.path.display(),
            count = events.len(),
            "Event collection loaded"
        );
        Ok(Self {
            index: RwLock::new(EventIndex::from_events(events)),
            feeds: FeedRegistry::new(),
            config,
        })
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Write the collection atomically: temp file, then rename over the
    /// previous document
    fn persist(&self, events: &[Event]) -> Result<()> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(events)?
        } else {
            serde_json::to_string(events)?
        };

        let path = &self.config.path;
        let tmp_path = path.with_extension("tmp");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventError::Config(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(&tmp_path, json).map_err(|e| {
            EventError::Storage(format!(
                "Failed to write event file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        std::fs::rename(&tmp_path, path).map_err(|e| {
            EventError::Storage(format!(
                "Failed to rename event file {} → {}: {}",
                tmp_path.display(),
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), count = events.len(), "Event collection saved");
        Ok(())
    }
}

fn load_events(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        EventError::Storage(format!(
            "Failed to read event file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&json).map_err(|e| {
        EventError::Storage(format!(
            "Failed to parse event file {}: {}",
            path.display(),
            e
        ))
    })
}

#[async_trait]
impl EventStore for FileStore {
    async fn list_all(&self) -> Result<EventFeed> {
        let ordered = self.index.read().await.ordered();
        Ok(self.feeds.subscribe_all(ordered).await)
    }

    async fn list_for_range(&self, start: i64, end: i64) -> Result<EventFeed> {
        let ordered = self.index.read().await.ordered();
        Ok(self.feeds.subscribe_range(start, end, ordered).await)
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>> {
        Ok(self.index.read().await.get(id))
    }

    async fn insert(&self, draft: EventDraft) -> Result<EventId> {
        let (id, ordered) = {
            let mut index = self.index.write().await;
            let id = index.insert(draft)?;
            let ordered = index.ordered();
            // Persist inside the critical section so each committed write
            // reaches the disk before the next one starts.
            self.persist(&ordered)?;
            (id, ordered)
        };
        self.feeds.notify(&ordered).await;
        Ok(id)
    }

    async fn update(&self, event: Event) -> Result<()> {
        let ordered = {
            let mut index = self.index.write().await;
            index.update(event)?;
            let ordered = index.ordered();
            self.persist(&ordered)?;
            ordered
        };
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn delete(&self, id: EventId) -> Result<()> {
        let ordered = {
            let mut index = self.index.write().await;
            if !index.delete(id) {
                return Ok(());
            }
            let ordered = index.ordered();
            self.persist(&ordered)?;
            ordered
        };
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[EventId]) -> Result<()> {
        let ordered = {
            let mut index = self.index.write().await;
            if index.delete_many(ids) == 0 {
                return Ok(());
            }
            let ordered = index.ordered();
            self.persist(&ordered)?;
            ordered
        };
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn info(&self) -> Result<StoreInfo> {
        Ok(StoreInfo {
            store: "file".to_string(),
            events: self.index.read().await.len() as u64,
            feeds: self.feeds.len().await,
        })
    }

    fn name(&self) -> &str {
        "file"
    }
}
