use chrono::{Days, Local, NaiveDate};
use tracing::debug;

use super::action::Action;
use super::effects::Effect;
use super::state::AppState;
use crate::formatting;
use crate::selector;

/// Pure state reducer - like Redux reducer
///
/// Takes current state and an action, returns new state and an effect.
/// No I/O happens here; fetches, persistence and browser launches are
/// returned as `Effect` and executed by the runtime.
pub fn reduce(state: AppState, action: Action) -> (AppState, Effect) {
    let mut new_state = state;
    match action {
        Action::RefreshData => {
            let effect = begin_refresh(&mut new_state);
            (new_state, effect)
        }

        Action::EventsLoaded { seq, result } => {
            match result {
                Ok(list) => {
                    if new_state.events.apply(seq, list) {
                        new_state.loading = false;
                        new_state.last_refresh = Some(Local::now());
                        new_state.clear_error();
                        rebuild_view(&mut new_state);
                    }
                }
                Err(message) => {
                    if new_state.events.is_current(seq) {
                        new_state.loading = false;
                        new_state.set_status_error_message(format!("Failed to load events: {}", message));
                    } else {
                        debug!("REDUCER: ignoring stale error seq={}", seq);
                    }
                }
            }
            (new_state, Effect::None)
        }

        Action::NextSport | Action::PreviousSport => {
            let sport = new_state.filters.settings.sport;
            new_state.filters.settings.sport = if matches!(action, Action::NextSport) {
                sport.next()
            } else {
                sport.previous()
            };
            debug!("REDUCER: sport -> {}", new_state.filters.settings.sport);
            reset_events(&mut new_state);
            let fetch = begin_refresh(&mut new_state);
            let persist = Effect::PersistSettings(new_state.filters.settings);
            (new_state, Effect::Batch(vec![persist, fetch]))
        }

        Action::PreviousDate | Action::NextDate | Action::Today => {
            let date = new_state.filters.date;
            let target = match action {
                Action::PreviousDate => date.checked_sub_days(Days::new(1)),
                Action::NextDate => date.checked_add_days(Days::new(1)),
                _ => Some(Local::now().date_naive()),
            };
            match target {
                Some(target) if target != date => change_date(new_state, target),
                _ => (new_state, Effect::None),
            }
        }

        Action::ToggleHideFinished | Action::ToggleHideNotStarted | Action::ToggleLongNames => {
            let settings = &mut new_state.filters.settings;
            match action {
                Action::ToggleHideFinished => settings.hide_finished = !settings.hide_finished,
                Action::ToggleHideNotStarted => settings.hide_not_started = !settings.hide_not_started,
                _ => settings.long_names = !settings.long_names,
            }
            rebuild_view(&mut new_state);
            let fetch = begin_refresh(&mut new_state);
            let persist = Effect::PersistSettings(new_state.filters.settings);
            (new_state, Effect::Batch(vec![persist, fetch]))
        }

        Action::SelectNext => {
            let count = new_state.event_count();
            new_state.selected = match new_state.selected {
                _ if count == 0 => None,
                Some(i) => Some((i + 1).min(count - 1)),
                None => Some(0),
            };
            (new_state, Effect::None)
        }

        Action::SelectPrevious => {
            let count = new_state.event_count();
            new_state.selected = match new_state.selected {
                _ if count == 0 => None,
                Some(i) => Some(i.saturating_sub(1)),
                None => Some(0),
            };
            (new_state, Effect::None)
        }

        Action::OpenSelected => {
            let url = new_state.selected_event().map(|row| row.detail_url.clone());
            match url {
                Some(url) => {
                    new_state.set_status_message(format!("Opening {}", url));
                    (new_state, Effect::OpenUrl(url))
                }
                None => (new_state, Effect::None),
            }
        }

        Action::SetStatusMessage { message, is_error } => {
            if is_error {
                new_state.set_status_error_message(message);
            } else {
                new_state.set_status_message(message);
            }
            (new_state, Effect::None)
        }

        Action::Quit => (new_state, Effect::None),
    }
}

fn change_date(mut state: AppState, date: NaiveDate) -> (AppState, Effect) {
    debug!("REDUCER: date -> {}", date);
    state.filters.date = date;
    reset_events(&mut state);
    let effect = begin_refresh(&mut state);
    (state, effect)
}

/// Issue a new sequence number and request a fetch for the current filters
fn begin_refresh(state: &mut AppState) -> Effect {
    let seq = state.events.issue();
    state.loading = true;
    Effect::FetchEvents {
        seq,
        sport: state.filters.settings.sport,
        date: state.filters.date,
    }
}

fn reset_events(state: &mut AppState) {
    state.events.clear();
    state.view = None;
    state.selected = None;
}

/// Re-derive rows from the displayed events and keep the selection in range
fn rebuild_view(state: &mut AppState) {
    let Some(list) = state.events.current() else {
        state.view = None;
        state.selected = None;
        return;
    };
    let selection = selector::select(&list.events, &state.filters);
    let view = formatting::present(&selection, &state.filters, &state.endpoints);
    let count = view.event_count();
    state.selected = match state.selected {
        _ if count == 0 => None,
        Some(i) => Some(i.min(count - 1)),
        None => Some(0),
    };
    state.view = Some(view);
}
