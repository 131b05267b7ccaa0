use std::sync::Arc;

use crate::types::EventList;

/// Global actions - like Redux actions
///
/// All state changes in the application happen through actions.
/// Actions are dispatched from:
/// - User input (key events)
/// - The refresh timer
/// - Effects (async data loading)
#[derive(Debug, Clone)]
pub enum Action {
    // Data actions
    /// Start a new fetch for the current sport and date
    RefreshData,
    /// A fetch finished; `seq` is the number it was issued with
    EventsLoaded {
        seq: u64,
        result: Result<Arc<EventList>, String>,
    },

    // Filter actions (each persists and refetches)
    NextSport,
    PreviousSport,
    PreviousDate,
    NextDate,
    Today,
    ToggleHideFinished,
    ToggleHideNotStarted,
    ToggleLongNames,

    // Selection
    SelectNext,
    SelectPrevious,
    OpenSelected,

    // System actions
    SetStatusMessage { message: String, is_error: bool },
    Quit,
}
