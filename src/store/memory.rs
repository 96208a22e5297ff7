//! In-memory event store for single-process use and testing

use crate::error::Result;
use crate::store::{EventFeed, EventIndex, EventStore, FeedRegistry, StoreInfo};
use crate::types::{Event, EventDraft, EventId};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory event store
///
/// Keeps the full collection in a `BTreeMap` behind an async lock and
/// notifies live feeds after every committed mutation. Data is lost on
/// drop — use [`FileStore`](crate::store::file::FileStore) for durability.
pub struct MemoryStore {
    index: RwLock<EventIndex>,
    feeds: FeedRegistry,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            index: RwLock::new(EventIndex::new()),
            feeds: FeedRegistry::new(),
        }
    }

    /// Create a store pre-populated with existing events
    ///
    /// The id sequence resumes after the highest id present.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            index: RwLock::new(EventIndex::from_events(events)),
            feeds: FeedRegistry::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
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
            (id, index.ordered())
        };
        tracing::debug!(id, "Event inserted");
        self.feeds.notify(&ordered).await;
        Ok(id)
    }

    async fn update(&self, event: Event) -> Result<()> {
        let id = event.id;
        let ordered = {
            let mut index = self.index.write().await;
            index.update(event)?;
            index.ordered()
        };
        tracing::debug!(id, "Event updated");
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn delete(&self, id: EventId) -> Result<()> {
        let ordered = {
            let mut index = self.index.write().await;
            if !index.delete(id) {
                // Deleting a missing id is a no-op
                return Ok(());
            }
            index.ordered()
        };
        tracing::debug!(id, "Event deleted");
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[EventId]) -> Result<()> {
        let (removed, ordered) = {
            let mut index = self.index.write().await;
            let removed = index.delete_many(ids);
            if removed == 0 {
                return Ok(());
            }
            (removed, index.ordered())
        };
        tracing::debug!(requested = ids.len(), removed, "Events batch-deleted");
        self.feeds.notify(&ordered).await;
        Ok(())
    }

    async fn info(&self) -> Result<StoreInfo> {
        Ok(StoreInfo {
            store: "memory".to_string(),
            events: self.index.read().await.len() as u64,
            feeds: self.feeds.len().await,
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}
