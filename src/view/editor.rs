//! Event detail and edit form adapters
//!
//! The edit form is the edit boundary: it validates the title and time
//! range, normalizes empty optional fields to absent, and produces either
//! an insert draft or a whole-record update. The detail view formats a
//! fetched event for display, hiding absent optional fields.

use crate::error::{EventError, Result};
use crate::types::{now_millis, Event, EventDraft, EventId, DEFAULT_DURATION_MS};
use crate::view::format_local;

/// What a saved form asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// A new event to insert
    Create(EventDraft),
    /// An existing event to replace
    Update(Event),
}

/// Editable state behind the create/edit dialog
///
/// Text fields hold raw user input; normalization happens on save.
#[derive(Debug, Clone)]
pub struct EventForm {
    id: Option<EventId>,
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
    pub location: String,
    pub email: String,
    pub note: String,
    pub file_path: String,
    is_completed: bool,
}

impl EventForm {
    /// Blank form for a new event
    ///
    /// Seeded with the given start timestamp when creating from a
    /// selected calendar day; defaults to now. The end lands one hour
    /// after the start either way. Seeding applies only on creation.
    pub fn create(seed: Option<i64>) -> Self {
        let start_time = seed.unwrap_or_else(now_millis);
        Self {
            id: None,
            title: String::new(),
            start_time,
            end_time: start_time + DEFAULT_DURATION_MS,
            location: String::new(),
            email: String::new(),
            note: String::new(),
            file_path: String::new(),
            is_completed: false,
        }
    }

    /// Form populated from a fetched event
    pub fn edit(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location.clone().unwrap_or_default(),
            email: event.email.clone().unwrap_or_default(),
            note: event.note.clone().unwrap_or_default(),
            file_path: event.file_path.clone().unwrap_or_default(),
            is_completed: event.is_completed,
        }
    }

    /// Whether the form edits an existing event
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Pick a new start time
    ///
    /// A start at-or-after the current end pushes the end one hour past
    /// the new start, keeping the range valid.
    pub fn set_start(&mut self, start_time: i64) {
        self.start_time = start_time;
        if self.end_time <= start_time {
            self.end_time = start_time + DEFAULT_DURATION_MS;
        }
    }

    /// Pick a new end time
    ///
    /// Rejected outright when it does not land after the start.
    pub fn set_end(&mut self, end_time: i64) -> Result<()> {
        if end_time <= self.start_time {
            return Err(EventError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
        self.end_time = end_time;
        Ok(())
    }

    /// Validate the form without building anything
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(EventError::Validation(
                "event title must not be empty".to_string(),
            ));
        }
        if self.end_time <= self.start_time {
            return Err(EventError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and produce the submission for the controller
    ///
    /// A failed validation aborts with no partial write; the caller shows
    /// the message inline and keeps the form open.
    pub fn save(&self) -> Result<FormSubmission> {
        self.validate()?;

        let draft = EventDraft {
            title: self.title.trim().to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
            location: normalize(&self.location),
            email: normalize(&self.email),
            note: normalize(&self.note),
            file_path: normalize(&self.file_path),
            is_completed: self.is_completed,
        };

        Ok(match self.id {
            Some(id) => FormSubmission::Update(draft.into_event(id)),
            None => FormSubmission::Create(draft),
        })
    }
}

/// Empty or whitespace-only input counts as absent
fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read-only detail rendering of a fetched event
///
/// Optional fields are `None` when absent so the screen can hide their
/// labels entirely, matching the detail dialog's behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub id: EventId,
    pub title: String,
    /// "dd.mm.yyyy HH:MM - dd.mm.yyyy HH:MM"
    pub time_range: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub file_path: Option<String>,
    pub is_completed: bool,
}

impl EventDetails {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            time_range: format!(
                "{} - {}",
                format_local(event.start_time, "%d.%m.%Y %H:%M"),
                format_local(event.end_time, "%d.%m.%Y %H:%M"),
            ),
            location: event.location.clone(),
            email: event.email.clone(),
            note: event.note.clone(),
            file_path: event.file_path.clone(),
            is_completed: event.is_completed,
        }
    }
}
