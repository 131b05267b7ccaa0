//! Event selection: ordering and filtering of a fetched event list
//!
//! `select` is pure. It partitions events so that major-league events come
//! first (stable within each partition), drops events whose shifted local
//! date precedes the selected date, and applies the finished/not-started
//! toggles.

use chrono::{DateTime, Local, NaiveDate};

use crate::settings::FilterSettings;
use crate::types::{Event, EventStatus};

/// League-name tokens that mark an event as major league
pub const MAJOR_LEAGUES: [&str; 4] = ["NBA", "MLB", "NHL", "NFL"];

/// Start instants are shifted back this far before taking the calendar date (US Eastern)
pub const LOCAL_DATE_OFFSET_SECS: i64 = 4 * 3600;

/// Everything `select` needs: the persisted toggles plus the selected date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub settings: FilterSettings,
    pub date: NaiveDate,
}

impl FilterState {
    pub fn new(settings: FilterSettings, date: NaiveDate) -> Self {
        Self { settings, date }
    }

    /// Filters for today's local date
    pub fn today(settings: FilterSettings) -> Self {
        Self::new(settings, Local::now().date_naive())
    }
}

/// Result of a selection pass
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    /// The API returned no events at all
    NoEvents,
    /// Events existed but every one was filtered out
    NoMatches,
    /// Surviving events, major leagues first
    Events(Vec<&'a Event>),
}

pub const NO_EVENTS_MESSAGE: &str = "No events are scheduled for today.";
pub const NO_MATCHES_MESSAGE: &str = "No events match the selected filters.";

impl<'a> Selection<'a> {
    /// Placeholder message when nothing is shown
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Selection::NoEvents => Some(NO_EVENTS_MESSAGE),
            Selection::NoMatches => Some(NO_MATCHES_MESSAGE),
            Selection::Events(_) => None,
        }
    }

    pub fn events(&self) -> &[&'a Event] {
        match self {
            Selection::Events(events) => events,
            _ => &[],
        }
    }
}

/// Substring match against the major-league tokens
pub fn is_major_league(league: &str) -> bool {
    MAJOR_LEAGUES.iter().any(|token| league.contains(token))
}

/// Calendar date of `start_timestamp` after the fixed Eastern shift
pub fn local_shifted_date(start_timestamp: i64) -> Option<NaiveDate> {
    let shifted = start_timestamp.checked_sub(LOCAL_DATE_OFFSET_SECS)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.date_naive())
}

/// Whether the filters drop this event
pub fn is_filtered_out(event: &Event, filters: &FilterState) -> bool {
    let before_selected = local_shifted_date(event.start_timestamp)
        .is_some_and(|date| date < filters.date);

    let status = event.status();
    before_selected
        || (filters.settings.hide_finished && *status == EventStatus::Finished)
        || (filters.settings.hide_not_started && *status == EventStatus::NotStarted)
}

/// Order and filter a fetched list
pub fn select<'a>(events: &'a [Event], filters: &FilterState) -> Selection<'a> {
    if events.is_empty() {
        return Selection::NoEvents;
    }

    let mut ordered: Vec<&Event> = events.iter().collect();
    // sort_by_key is stable: false (major) sorts before true
    ordered.sort_by_key(|event| !is_major_league(event.league()));
    ordered.retain(|event| !is_filtered_out(event, filters));

    if ordered.is_empty() {
        Selection::NoMatches
    } else {
        Selection::Events(ordered)
    }
}
