//! # taskflow-event
//!
//! Event storage, live day queries, and schedule tracking for the TaskFlow
//! personal calendar.
//!
//! ## Overview
//!
//! `taskflow-event` is the data backbone of a calendar/task app: a
//! pluggable store of time-boxed events, a repository service, and a
//! view-model controller exposing live list feeds. Swap backends
//! (in-memory, file-backed) without changing application code.
//!
//! ## Quick Start
//!
//! ```rust
//! use taskflow_event::{EventController, EventDraft, EventService, MemoryStore};
//!
//! # async fn example() -> taskflow_event::Result<()> {
//! let service = EventService::new(MemoryStore::new());
//! let mut controller = EventController::new(service).await?;
//!
//! // Fire-and-forget insert; the write commits in the background
//! controller.insert(EventDraft::new(
//!     "Standup",
//!     1_700_000_000_000,
//!     1_700_001_800_000,
//! ));
//!
//! // The schedule feed delivers a fresh snapshot once it lands
//! if let Some(events) = controller.schedule_changed().await {
//!     println!("{} events scheduled", events.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Backends
//!
//! - **memory** — in-memory store for single-process use and testing
//! - **file** — JSON-file-backed store with atomic writes
//!
//! ## Architecture
//!
//! - **EventStore** trait — core abstraction all backends implement
//! - **EventService** — repository pass-through that decouples callers
//!   from the storage technology
//! - **EventController** — view-model owning the live feeds and
//!   dispatching fire-and-forget mutations
//! - **EventFeed** — live query handle: snapshot now, fresh snapshots on
//!   every committed write
//! - **view** — presentation adapters: schedule list (multi-select,
//!   tap disambiguation), calendar day window, detail/edit form

pub mod controller;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod view;

// Re-export core types
pub use controller::EventController;
pub use error::{EventError, Result};
pub use service::EventService;
pub use store::{EventFeed, EventStore, StoreInfo};
pub use types::{Event, EventDraft, EventId, DEFAULT_DURATION_MS};

// Re-export backends for convenience
pub use store::file::{FileConfig, FileStore};
pub use store::memory::MemoryStore;

// Re-export presentation adapters
pub use view::calendar::{day_window, CalendarPane, CalendarRow};
pub use view::editor::{EventDetails, EventForm, FormSubmission};
pub use view::schedule::{RowAction, ScheduleList, ScheduleRow, DOUBLE_TAP_WINDOW};
