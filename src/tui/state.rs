use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::client::Endpoints;
use crate::formatting::{EventRow, ScoreView};
use crate::refresh::DisplaySlot;
use crate::selector::FilterState;
use crate::settings::FilterSettings;
use crate::types::EventList;

/// Root application state - single source of truth
///
/// All state changes happen through the reducer.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current sport, date and toggles
    pub filters: FilterState,

    /// Last applied fetch, guarded by request sequence numbers
    pub events: DisplaySlot<Arc<EventList>>,

    /// Rows derived from `events` and `filters`; None until the first response
    pub view: Option<ScoreView>,

    /// Index into the view's event rows
    pub selected: Option<usize>,

    pub loading: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub status: StatusMessage,

    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: Option<String>,
    pub is_error: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FilterState::today(FilterSettings::default()), Endpoints::default())
    }
}

impl AppState {
    pub fn new(filters: FilterState, endpoints: Endpoints) -> Self {
        Self {
            filters,
            events: DisplaySlot::new(),
            view: None,
            selected: None,
            loading: false,
            last_refresh: None,
            status: StatusMessage::default(),
            endpoints,
        }
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status = StatusMessage {
            message: Some(message.into()),
            is_error: false,
        };
    }

    pub fn set_status_error_message(&mut self, message: impl Into<String>) {
        self.status = StatusMessage {
            message: Some(message.into()),
            is_error: true,
        };
    }

    pub fn clear_error(&mut self) {
        if self.status.is_error {
            self.status = StatusMessage::default();
        }
    }

    pub fn event_count(&self) -> usize {
        self.view.as_ref().map(ScoreView::event_count).unwrap_or(0)
    }

    pub fn selected_event(&self) -> Option<&EventRow> {
        let index = self.selected?;
        self.view.as_ref()?.event_rows().nth(index)
    }
}
