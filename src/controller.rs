//! Event controller — the view-model layer
//!
//! Owns the live feeds the screens render from and dispatches mutations
//! without blocking the caller. Mutations are fire-and-forget: the
//! controller spawns the write onto the runtime and returns immediately;
//! callers observe the effect through the feeds, not through a return
//! value. A write already submitted runs to completion even if the
//! controller is dropped.

use crate::error::Result;
use crate::service::EventService;
use crate::store::EventFeed;
use crate::types::{Event, EventDraft, EventId};

/// View-model over an [`EventService`]
///
/// Holds one subscription to the full schedule for the lifetime of the
/// controller, and at most one day-window subscription that is re-created
/// whenever the selected day changes.
pub struct EventController {
    service: EventService,
    schedule: EventFeed,
    day: Option<EventFeed>,
    day_window: Option<(i64, i64)>,
}

impl EventController {
    /// Create a controller and establish the schedule feed
    pub async fn new(service: EventService) -> Result<Self> {
        let schedule = service.list_all().await?;
        Ok(Self {
            service,
            schedule,
            day: None,
            day_window: None,
        })
    }

    /// Current snapshot of the full schedule
    pub fn schedule_events(&self) -> Vec<Event> {
        self.schedule.snapshot()
    }

    /// Wait for the next schedule snapshot
    ///
    /// Returns `None` once the backing store has been dropped.
    pub async fn schedule_changed(&mut self) -> Option<Vec<Event>> {
        self.schedule.changed().await
    }

    /// Subscribe the calendar to a day window `[start, end)`
    ///
    /// The previous day feed, if any, is released before the new one is
    /// established, so the store never accumulates stale subscriptions.
    pub async fn select_day(&mut self, start: i64, end: i64) -> Result<()> {
        self.day = None;
        self.day_window = None;
        let feed = self.service.list_for_range(start, end).await?;
        self.day = Some(feed);
        self.day_window = Some((start, end));
        tracing::debug!(start, end, "Day window selected");
        Ok(())
    }

    /// The currently selected day window, if any
    pub fn day_window(&self) -> Option<(i64, i64)> {
        self.day_window
    }

    /// Current snapshot of the selected day; empty when no day is selected
    pub fn day_events(&self) -> Vec<Event> {
        self.day.as_ref().map(EventFeed::snapshot).unwrap_or_default()
    }

    /// Wait for the next day snapshot
    ///
    /// Returns `None` when no day is selected or the store is gone.
    pub async fn day_changed(&mut self) -> Option<Vec<Event>> {
        match self.day.as_mut() {
            Some(feed) => feed.changed().await,
            None => None,
        }
    }

    /// Awaitable point lookup, used to populate detail and edit screens
    ///
    /// The one read exposed to an awaiting caller; it runs on the async
    /// runtime and never blocks the foreground thread.
    pub async fn event(&self, id: EventId) -> Result<Option<Event>> {
        self.service.get(id).await
    }

    /// Insert a new event, fire-and-forget
    pub fn insert(&self, draft: EventDraft) {
        let service = self.service.clone();
        tokio::spawn(async move {
            if let Err(e) = service.insert(draft).await {
                tracing::warn!(error = %e, "Failed to insert event");
            }
        });
    }

    /// Submit a whole-record update, fire-and-forget
    pub fn update(&self, event: Event) {
        let service = self.service.clone();
        tokio::spawn(async move {
            let id = event.id;
            if let Err(e) = service.update(event).await {
                tracing::warn!(id, error = %e, "Failed to update event");
            }
        });
    }

    /// Delete a single event, fire-and-forget
    pub fn delete(&self, id: EventId) {
        let service = self.service.clone();
        tokio::spawn(async move {
            if let Err(e) = service.delete(id).await {
                tracing::warn!(id, error = %e, "Failed to delete event");
            }
        });
    }

    /// Delete a batch of events by id, fire-and-forget and best-effort
    pub fn delete_by_ids(&self, ids: Vec<EventId>) {
        let service = self.service.clone();
        tokio::spawn(async move {
            if let Err(e) = service.delete_by_ids(&ids).await {
                tracing::warn!(count = ids.len(), error = %e, "Failed to delete events");
            }
        });
    }

    /// The underlying service, for composing additional screens
    pub fn service(&self) -> &EventService {
        &self.service
    }
}
