//! Schedule list adapter
//!
//! Renders the flat schedule feed and translates row gestures into
//! controller actions. Owns two pieces of ephemeral state: the
//! single/double tap tracker and the multi-select bookkeeping
//! (a mode flag plus the set of selected ids, cleared on exit).

use crate::types::{Event, EventId};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Two taps on the same row within this window form a double-tap
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(500);

/// What a gesture on the schedule list asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Open the detail screen for an event
    OpenDetails(EventId),
    /// Flip the completion flag and submit a whole-record update
    ToggleCompletion(EventId),
    /// Delete a single event
    Delete(EventId),
    /// Delete every selected event
    DeleteSelected(Vec<EventId>),
    /// Selection membership changed; re-render, nothing to mutate
    SelectionChanged,
    /// Gesture consumed with no effect
    Ignored,
}

/// View state for one rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub id: EventId,
    pub title: String,
    /// Checkbox state: completed, or selected while multi-selecting
    pub checked: bool,
    /// Completed rows render dimmed
    pub dimmed: bool,
    /// Row is highlighted as part of the pending batch-delete set
    pub selected: bool,
}

/// The schedule list's ephemeral presentation state
#[derive(Debug, Default)]
pub struct ScheduleList {
    multi_select: bool,
    selected: HashSet<EventId>,
    last_tap: Option<(EventId, Instant)>,
}

impl ScheduleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether multi-select mode is active
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Ids currently marked for batch deletion
    pub fn selected_ids(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// A tap on a row at the given instant
    ///
    /// Outside multi-select mode, a second tap on the same row within
    /// [`DOUBLE_TAP_WINDOW`] is a double-tap and toggles completion —
    /// exactly one action for the pair. A tap past the window, or on a
    /// different row, starts a new single tap and opens the detail
    /// screen. In multi-select mode taps toggle selection membership
    /// instead.
    pub fn tap(&mut self, id: EventId, at: Instant) -> RowAction {
        if self.multi_select {
            self.toggle_selection(id);
            return RowAction::SelectionChanged;
        }

        match self.last_tap {
            Some((last_id, last_at))
                if last_id == id && at.duration_since(last_at) < DOUBLE_TAP_WINDOW =>
            {
                self.last_tap = None;
                RowAction::ToggleCompletion(id)
            }
            _ => {
                self.last_tap = Some((id, at));
                RowAction::OpenDetails(id)
            }
        }
    }

    /// A long-press enters multi-select mode with the pressed row selected
    pub fn long_press(&mut self, id: EventId) -> RowAction {
        self.multi_select = true;
        self.selected.insert(id);
        RowAction::SelectionChanged
    }

    /// A checkbox toggle on a row
    ///
    /// While multi-selecting this edits the pending-delete set; otherwise
    /// it toggles completion on the event itself.
    pub fn set_checked(&mut self, id: EventId, checked: bool) -> RowAction {
        if self.multi_select {
            if checked {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
            RowAction::SelectionChanged
        } else {
            RowAction::ToggleCompletion(id)
        }
    }

    /// The per-row delete affordance
    pub fn delete_row(&self, id: EventId) -> RowAction {
        RowAction::Delete(id)
    }

    /// Delete everything selected, exiting multi-select mode
    ///
    /// With nothing selected the gesture is ignored and the mode stays
    /// active.
    pub fn delete_selected(&mut self) -> RowAction {
        if self.selected.is_empty() {
            return RowAction::Ignored;
        }
        let ids = self.selected_ids();
        self.exit_multi_select();
        RowAction::DeleteSelected(ids)
    }

    /// Leave multi-select mode, clearing the selection
    pub fn exit_multi_select(&mut self) {
        self.multi_select = false;
        self.selected.clear();
    }

    /// Render row view state for a schedule snapshot
    pub fn rows(&self, events: &[Event]) -> Vec<ScheduleRow> {
        events
            .iter()
            .map(|event| {
                let selected = self.multi_select && self.selected.contains(&event.id);
                ScheduleRow {
                    id: event.id,
                    title: event.title.clone(),
                    checked: event.is_completed || selected,
                    dimmed: event.is_completed,
                    selected,
                }
            })
            .collect()
    }

    fn toggle_selection(&mut self, id: EventId) {
        if !self.selected.insert(id) {
            self.selected.remove(&id);
        }
    }
}
