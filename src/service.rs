//! Event service — the repository layer
//!
//! A pure delegation layer over any [`EventStore`]: every method mirrors
//! the store's signature and error behavior exactly, adding no logic. It
//! exists so the storage backend can be swapped (in-memory, file-backed,
//! networked) without touching the controller or presentation layers.

use crate::error::Result;
use crate::store::{EventFeed, EventStore, StoreInfo};
use crate::types::{Event, EventDraft, EventId};
use std::sync::Arc;

/// Repository over a pluggable event store
///
/// Cheap to clone — all clones share the same backend.
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    /// Create a service over a store
    pub fn new(store: impl EventStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a service over an already-shared store
    pub fn from_arc(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Live feed of all events, ordered by start time
    pub async fn list_all(&self) -> Result<EventFeed> {
        self.store.list_all().await
    }

    /// Live feed of events with `start_time` in `[start, end)`
    pub async fn list_for_range(&self, start: i64, end: i64) -> Result<EventFeed> {
        self.store.list_for_range(start, end).await
    }

    /// Point lookup by id
    pub async fn get(&self, id: EventId) -> Result<Option<Event>> {
        self.store.get(id).await
    }

    /// Insert a new event, returning the store-assigned id
    pub async fn insert(&self, draft: EventDraft) -> Result<EventId> {
        self.store.insert(draft).await
    }

    /// Whole-record update
    pub async fn update(&self, event: Event) -> Result<()> {
        self.store.update(event).await
    }

    /// Delete a single event; missing ids are a no-op
    pub async fn delete(&self, id: EventId) -> Result<()> {
        self.store.delete(id).await
    }

    /// Best-effort batch delete
    pub async fn delete_by_ids(&self, ids: &[EventId]) -> Result<()> {
        self.store.delete_by_ids(ids).await
    }

    /// Store status information
    pub async fn info(&self) -> Result<StoreInfo> {
        self.store.info().await
    }

    /// Name of the backing store
    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_service_delegates_to_store() {
        let service = EventService::new(MemoryStore::new());
        assert_eq!(service.store_name(), "memory");

        let id = service
            .insert(EventDraft::new("Standup", 100, 200))
            .await
            .unwrap();
        assert_eq!(service.get(id).await.unwrap().unwrap().title, "Standup");

        service.delete(id).await.unwrap();
        assert!(service.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_backend() {
        let service = EventService::new(MemoryStore::new());
        let other = service.clone();

        let id = other
            .insert(EventDraft::new("Shared", 100, 200))
            .await
            .unwrap();
        assert!(service.get(id).await.unwrap().is_some());
    }
}
