//! Calendar adapter
//!
//! Tracks the selected day, computes its local-midnight window, and keeps
//! the controller's day feed pointed at it. The day window is the
//! half-open epoch-ms interval [local midnight, next local midnight) —
//! the store never knows about days, only about start-time ranges.

use crate::controller::EventController;
use crate::error::Result;
use crate::types::{Event, EventId};
use crate::view::format_local;
use chrono::{Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// View state for one rendered calendar row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRow {
    pub id: EventId,
    pub title: String,
    /// "HH:MM - HH:MM"
    pub time_range: String,
}

/// The calendar screen's ephemeral state: which day is showing
#[derive(Debug, Clone)]
pub struct CalendarPane {
    selected: NaiveDate,
}

impl CalendarPane {
    /// Start on today's date (local timezone)
    pub fn new() -> Self {
        Self {
            selected: Local::now().date_naive(),
        }
    }

    /// The currently selected day
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Select a day and re-point the controller's day feed at its window
    ///
    /// The controller releases the previous day subscription before
    /// establishing the new one.
    pub async fn select(
        &mut self,
        controller: &mut EventController,
        date: NaiveDate,
    ) -> Result<()> {
        self.selected = date;
        let (start, end) = day_window(date);
        controller.select_day(start, end).await
    }

    /// Seed timestamp for creating an event on the selected day
    /// (local midnight, matching the original new-event flow)
    pub fn seed_ms(&self) -> i64 {
        local_midnight_ms(self.selected)
    }

    /// Render rows for a day snapshot
    pub fn rows(&self, events: &[Event]) -> Vec<CalendarRow> {
        events
            .iter()
            .map(|event| CalendarRow {
                id: event.id,
                title: event.title.clone(),
                time_range: format!(
                    "{} - {}",
                    format_local(event.start_time, "%H:%M"),
                    format_local(event.end_time, "%H:%M"),
                ),
            })
            .collect()
    }
}

impl Default for CalendarPane {
    fn default() -> Self {
        Self::new()
    }
}

/// Half-open epoch-ms window covering one local calendar day:
/// [local midnight, next local midnight)
pub fn day_window(date: NaiveDate) -> (i64, i64) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    (local_midnight_ms(date), local_midnight_ms(next))
}

/// Epoch ms of the first valid local instant of the given day
///
/// Midnight can be skipped or doubled by DST transitions; scan forward in
/// half-hour steps until the local zone yields an instant.
fn local_midnight_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    for half_hours in 0..=48 {
        let candidate = midnight + chrono::Duration::minutes(30 * half_hours);
        match candidate.and_local_timezone(Local) {
            LocalResult::Single(dt) => return dt.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => return earliest.timestamp_millis(),
            LocalResult::None => continue,
        }
    }
    // Unreachable for any real timezone; fall back to the UTC reading
    Local.from_utc_datetime(&midnight).timestamp_millis()
}
