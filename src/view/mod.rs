//! Presentation adapters
//!
//! The logic behind the screens: selection bookkeeping, tap
//! disambiguation, day-window computation, form validation, and row
//! formatting. Everything here is ephemeral presentation state — never
//! persisted, never part of the [`Event`](crate::types::Event) entity.
//! Each adapter consumes one live feed and translates user gestures into
//! single controller mutations.

use chrono::{DateTime, Local, TimeZone};

pub mod calendar;
pub mod editor;
pub mod schedule;

/// Interpret an epoch-ms timestamp in the local timezone
pub(crate) fn local_datetime(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Format an epoch-ms timestamp with a chrono format string
///
/// Timestamps outside chrono's representable range render as "--".
pub(crate) fn format_local(ms: i64, fmt: &str) -> String {
    local_datetime(ms)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| "--".to_string())
}
