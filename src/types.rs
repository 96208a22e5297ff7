//! Core event types for the taskflow-event system
//!
//! All types use camelCase JSON serialization, matching the mobile
//! client's record format.

use serde::{Deserialize, Serialize};

/// Store-assigned event identifier
///
/// Auto-incremented by the store on insert and immutable thereafter.
pub type EventId = i64;

/// Default duration of a freshly seeded event (one hour in milliseconds)
pub const DEFAULT_DURATION_MS: i64 = 3_600_000;

/// A single calendar event
///
/// The sole persisted entity: a time-boxed item with a required title,
/// optional metadata, and an independent completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier assigned by the store on insert
    pub id: EventId,

    /// Non-empty event title
    pub title: String,

    /// Start of the event, Unix milliseconds
    pub start_time: i64,

    /// End of the event, Unix milliseconds
    ///
    /// `end_time > start_time` is enforced at the edit boundary,
    /// not by the store.
    pub end_time: i64,

    /// Optional location text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Optional contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Optional path to an attached file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Completion flag, toggled independently of the other fields
    #[serde(default)]
    pub is_completed: bool,
}

impl Event {
    /// Copy of this event with the completion flag flipped
    ///
    /// Toggling is not a store primitive: the caller flips the record it
    /// already holds and submits the copy as a whole-record update.
    pub fn toggled(&self) -> Self {
        let mut event = self.clone();
        event.is_completed = !event.is_completed;
        event
    }

    /// Ordering key for list queries: start time ascending, id as tie-break
    pub(crate) fn sort_key(&self) -> (i64, EventId) {
        (self.start_time, self.id)
    }
}

/// An event payload without an id — the insert request
///
/// The store assigns the id; everything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Non-empty event title
    pub title: String,

    /// Start of the event, Unix milliseconds
    pub start_time: i64,

    /// End of the event, Unix milliseconds
    pub end_time: i64,

    /// Optional location text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Optional contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Optional path to an attached file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Completion flag, defaults to false
    #[serde(default)]
    pub is_completed: bool,
}

impl EventDraft {
    /// Create a draft with the required fields; optional fields start absent
    pub fn new(title: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            title: title.into(),
            start_time,
            end_time,
            location: None,
            email: None,
            note: None,
            file_path: None,
            is_completed: false,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the attached file path
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Promote the draft to a full event with a store-assigned id
    pub(crate) fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            email: self.email,
            note: self.note,
            file_path: self.file_path,
            is_completed: self.is_completed,
        }
    }
}

/// Current time in Unix milliseconds
pub(crate) fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
