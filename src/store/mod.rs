//! Event store trait — the core abstraction for storage backends
//!
//! All storage backends (in-memory, file-backed, networked, etc.) implement
//! `EventStore` to provide a uniform API for live list queries, point
//! lookups, and single-record mutations. Live queries are delivered through
//! `EventFeed` handles that re-receive a full snapshot on every committed
//! mutation.

use crate::error::{EventError, Result};
use crate::types::{Event, EventDraft, EventId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;

pub mod file;
pub mod memory;

/// Core trait for event storage backends
///
/// Implementations handle the persistence-specific details; the
/// `EventService` and `EventController` layers use a store without
/// knowing which backend is behind it.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Live feed of all events, ordered by start time ascending
    /// (id ascending as tie-break)
    async fn list_all(&self) -> Result<EventFeed>;

    /// Live feed of events with `start_time` in `[start, end)`,
    /// same ordering as `list_all`
    ///
    /// Callers compute the interval; for a calendar day that is
    /// local midnight to the next local midnight.
    async fn list_for_range(&self, start: i64, end: i64) -> Result<EventFeed>;

    /// Point lookup by id — not live
    async fn get(&self, id: EventId) -> Result<Option<Event>>;

    /// Insert a new event, returning the store-assigned id
    ///
    /// Fails with `EventError::Validation` if the title is empty.
    async fn insert(&self, draft: EventDraft) -> Result<EventId>;

    /// Whole-record update — fields not set on the payload are replaced,
    /// never merged
    ///
    /// Fails with `EventError::NotFound` if the id does not exist.
    async fn update(&self, event: Event) -> Result<()>;

    /// Delete a single event; deleting a missing id is a no-op
    async fn delete(&self, id: EventId) -> Result<()>;

    /// Best-effort batch delete — missing ids are silently skipped
    async fn delete_by_ids(&self, ids: &[EventId]) -> Result<()>;

    /// Get store info (record count, live feed count)
    async fn info(&self) -> Result<StoreInfo>;

    /// Backend name (e.g., "memory", "file")
    fn name(&self) -> &str;

    /// Health check — returns true if the store is operational
    ///
    /// Default implementation delegates to `info()` and returns true if it
    /// succeeds. Backends may override for more specific checks.
    async fn health(&self) -> Result<bool> {
        self.info().await.map(|_| true)
    }
}

/// Store status information
#[derive(Debug, Clone)]
pub struct StoreInfo {
    /// Backend name
    pub store: String,
    /// Number of stored events
    pub events: u64,
    /// Number of live feeds currently registered
    pub feeds: usize,
}

/// The query a live feed re-evaluates on every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedQuery {
    /// All events
    All,
    /// Events with `start_time` in `[start, end)`
    Range { start: i64, end: i64 },
}

impl FeedQuery {
    fn evaluate(&self, ordered: &[Event]) -> Vec<Event> {
        match *self {
            FeedQuery::All => ordered.to_vec(),
            FeedQuery::Range { start, end } => ordered
                .iter()
                .filter(|e| e.start_time >= start && e.start_time < end)
                .cloned()
                .collect(),
        }
    }
}

/// A live query result
///
/// Holds the current snapshot and re-receives a fresh one whenever any
/// event is inserted, updated, or deleted. Dropping the feed releases the
/// subscription; the store prunes closed feeds on its next notification.
///
/// Delivery is coalescing: between two reads only the latest snapshot is
/// retained, so rapid successive writes may be observed as a single change.
pub struct EventFeed {
    rx: watch::Receiver<Vec<Event>>,
}

impl EventFeed {
    /// Current snapshot of the query result
    pub fn snapshot(&self) -> Vec<Event> {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot
    ///
    /// Returns `None` once the owning store has been dropped.
    pub async fn changed(&mut self) -> Option<Vec<Event>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Consume the feed as an async stream of snapshots
    pub fn into_stream(self) -> WatchStream<Vec<Event>> {
        WatchStream::new(self.rx)
    }
}

/// Registry of live feeds held by a store
///
/// On every committed mutation the store passes the fresh ordered list;
/// the registry re-evaluates each registered query and pushes the result.
/// Feeds whose receivers are gone are dropped during the push.
pub(crate) struct FeedRegistry {
    feeds: Mutex<Vec<(FeedQuery, watch::Sender<Vec<Event>>)>>,
}

impl FeedRegistry {
    pub(crate) fn new() -> Self {
        Self {
            feeds: Mutex::new(Vec::new()),
        }
    }

    /// Register a feed over all events, seeded with the current snapshot
    pub(crate) async fn subscribe_all(&self, ordered: Vec<Event>) -> EventFeed {
        self.subscribe(FeedQuery::All, ordered).await
    }

    /// Register a feed over a half-open start-time range
    pub(crate) async fn subscribe_range(
        &self,
        start: i64,
        end: i64,
        ordered: Vec<Event>,
    ) -> EventFeed {
        self.subscribe(FeedQuery::Range { start, end }, ordered).await
    }

    async fn subscribe(&self, query: FeedQuery, ordered: Vec<Event>) -> EventFeed {
        let (tx, rx) = watch::channel(query.evaluate(&ordered));
        let mut feeds = self.feeds.lock().await;
        feeds.retain(|(_, tx)| !tx.is_closed());
        feeds.push((query, tx));
        EventFeed { rx }
    }

    /// Push a fresh snapshot to every live feed, pruning closed ones
    pub(crate) async fn notify(&self, ordered: &[Event]) {
        let mut feeds = self.feeds.lock().await;
        feeds.retain(|(query, tx)| tx.send(query.evaluate(ordered)).is_ok());
    }

    /// Number of feeds still registered
    pub(crate) async fn len(&self) -> usize {
        self.feeds.lock().await.len()
    }
}

/// Shared in-memory record index used by the built-in backends
///
/// Owns the id counter and the ordering contract; backends wrap it in a
/// lock and add their own persistence.
pub(crate) struct EventIndex {
    events: BTreeMap<EventId, Event>,
    next_id: EventId,
}

impl EventIndex {
    pub(crate) fn new() -> Self {
        Self {
            events: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild an index from previously persisted events
    pub(crate) fn from_events(events: Vec<Event>) -> Self {
        let next_id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            events: events.into_iter().map(|e| (e.id, e)).collect(),
            next_id,
        }
    }

    pub(crate) fn insert(&mut self, draft: EventDraft) -> Result<EventId> {
        if draft.title.trim().is_empty() {
            return Err(EventError::Validation(
                "event title must not be empty".to_string(),
            ));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.events.insert(id, draft.into_event(id));
        Ok(id)
    }

    pub(crate) fn update(&mut self, event: Event) -> Result<()> {
        match self.events.get_mut(&event.id) {
            Some(slot) => {
                *slot = event;
                Ok(())
            }
            None => Err(EventError::NotFound(event.id)),
        }
    }

    /// Remove a single id; returns whether a record was actually removed
    pub(crate) fn delete(&mut self, id: EventId) -> bool {
        self.events.remove(&id).is_some()
    }

    /// Remove every existing id in the set; returns how many were removed
    pub(crate) fn delete_many(&mut self, ids: &[EventId]) -> usize {
        ids.iter().filter(|id| self.events.remove(id).is_some()).count()
    }

    pub(crate) fn get(&self, id: EventId) -> Option<Event> {
        self.events.get(&id).cloned()
    }

    /// All events in feed order
    pub(crate) fn ordered(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.events.values().cloned().collect();
        events.sort_by_key(Event::sort_key);
        events
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, start: i64) -> EventDraft {
        EventDraft::new(title, start, start + 1_000)
    }

    #[test]
    fn test_index_insert_assigns_sequential_ids() {
        let mut index = EventIndex::new();
        assert_eq!(index.insert(draft("A", 10)).unwrap(), 1);
        assert_eq!(index.insert(draft("B", 20)).unwrap(), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_index_insert_rejects_blank_title() {
        let mut index = EventIndex::new();
        assert!(matches!(
            index.insert(draft("", 10)),
            Err(EventError::Validation(_))
        ));
        assert!(matches!(
            index.insert(draft("   ", 10)),
            Err(EventError::Validation(_))
        ));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_index_update_missing_id() {
        let mut index = EventIndex::new();
        let ghost = draft("Ghost", 10).into_event(99);
        assert!(matches!(index.update(ghost), Err(EventError::NotFound(99))));
    }

    #[test]
    fn test_index_delete_is_noop_for_missing_id() {
        let mut index = EventIndex::new();
        assert!(!index.delete(42));
        let id = index.insert(draft("A", 10)).unwrap();
        assert!(index.delete(id));
        assert!(!index.delete(id));
    }

    #[test]
    fn test_index_delete_many_best_effort() {
        let mut index = EventIndex::new();
        let a = index.insert(draft("A", 10)).unwrap();
        let b = index.insert(draft("B", 20)).unwrap();
        assert_eq!(index.delete_many(&[a, 777, b, 888]), 2);
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_index_ordered_by_start_then_id() {
        let mut index = EventIndex::new();
        index.insert(draft("late", 300)).unwrap();
        index.insert(draft("early", 100)).unwrap();
        index.insert(draft("also-early", 100)).unwrap();

        let ordered = index.ordered();
        let titles: Vec<&str> = ordered.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "also-early", "late"]);
    }

    #[test]
    fn test_index_from_events_resumes_id_sequence() {
        let events = vec![
            draft("A", 10).into_event(3),
            draft("B", 20).into_event(7),
        ];
        let mut index = EventIndex::from_events(events);
        assert_eq!(index.insert(draft("C", 30)).unwrap(), 8);
    }

    #[test]
    fn test_feed_query_range_half_open() {
        let ordered = vec![
            draft("before", 99).into_event(1),
            draft("at-start", 100).into_event(2),
            draft("inside", 150).into_event(3),
            draft("at-end", 200).into_event(4),
        ];

        let hits = FeedQuery::Range { start: 100, end: 200 }.evaluate(&ordered);
        let ids: Vec<EventId> = hits.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_registry_notifies_and_prunes() {
        let registry = FeedRegistry::new();
        let mut feed = registry.subscribe_all(Vec::new()).await;
        assert_eq!(registry.len().await, 1);
        assert!(feed.snapshot().is_empty());

        let ordered = vec![draft("A", 10).into_event(1)];
        registry.notify(&ordered).await;
        let snapshot = feed.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        // Dropping the feed releases the subscription on the next notify
        drop(feed);
        registry.notify(&ordered).await;
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_feed_coalesces_rapid_snapshots() {
        let registry = FeedRegistry::new();
        let mut feed = registry.subscribe_all(Vec::new()).await;

        registry.notify(&[draft("A", 10).into_event(1)]).await;
        registry
            .notify(&[draft("A", 10).into_event(1), draft("B", 20).into_event(2)])
            .await;

        // Only the latest snapshot is observed
        let snapshot = feed.changed().await.unwrap();
        assert_eq!(snapshot.len(), 2);
    }
}
