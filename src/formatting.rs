//! Presentation rules for selected events
//!
//! Turns a [`Selection`] into display rows: a league heading the first
//! time each league appears, then one row per event with its time label,
//! status label and color, and a line per team.

use std::collections::HashSet;

use chrono::{Local, TimeZone, Timelike};
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::client::Endpoints;
use crate::selector::{FilterState, Selection};
use crate::types::{Event, EventStatus, Score, Side, Team, Winner};

/// Shown when a team has no recorded score
pub const SCORE_PLACEHOLDER: &str = "TBD";

/// Column width team names are fitted to
pub const TEAM_NAME_WIDTH: usize = 22;

/// Width of the time/status column
pub const INFO_COL_WIDTH: usize = 11;

/// Width of the score column
pub const SCORE_COL_WIDTH: usize = 7;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Orange,
    Green,
    White,
    Red,
    /// Unrecognized statuses keep the terminal's default foreground
    Default,
}

impl StatusColor {
    /// Foreground color shared by the TUI and the printed listing
    pub fn terminal_color(self) -> Option<Color> {
        match self {
            StatusColor::Orange => Some(Color::Rgb(255, 165, 0)),
            StatusColor::Green => Some(Color::Green),
            StatusColor::White => Some(Color::White),
            StatusColor::Red => Some(Color::Red),
            StatusColor::Default => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub color: StatusColor,
}

pub fn status_display(status: &EventStatus) -> StatusDisplay {
    let (label, color) = match status {
        EventStatus::InProgress => ("In Progress", StatusColor::Orange),
        EventStatus::Finished => ("Finished", StatusColor::Green),
        EventStatus::NotStarted => ("Not Started", StatusColor::White),
        EventStatus::Postponed => ("Postponed", StatusColor::Red),
        EventStatus::Other(_) => ("Unknown", StatusColor::Default),
    };
    StatusDisplay { label, color }
}

/// `h:mm AM/PM` in the local timezone
pub fn format_event_time(start_timestamp: i64) -> String {
    format_event_time_in(start_timestamp, &Local)
}

/// `h:mm AM/PM` in `tz`; hour 0 shows as 12
pub fn format_event_time_in<Tz: TimeZone>(start_timestamp: i64, tz: &Tz) -> String {
    let Some(time) = tz.timestamp_opt(start_timestamp, 0).single() else {
        return "--:--".to_string();
    };
    let hour = time.hour();
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, time.minute(), suffix)
}

pub fn team_display_name(team: &Team, long_names: bool) -> &str {
    if long_names {
        &team.name
    } else {
        team.short_name()
    }
}

/// The score's display string, or the placeholder when absent or empty
pub fn score_text(score: Option<&Score>) -> &str {
    score
        .and_then(|s| s.display.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(SCORE_PLACEHOLDER)
}

/// Losing side is dimmed once a winner is known
pub fn is_dimmed(winner: Winner, side: Side) -> bool {
    matches!((winner, side), (Winner::Home, Side::Away) | (Winner::Away, Side::Home))
}

/// Truncate to `width` terminal columns with a trailing ellipsis
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLine {
    pub name: String,
    pub score: String,
    pub logo_url: String,
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event_id: i64,
    pub time: String,
    pub status: StatusDisplay,
    pub home: TeamLine,
    pub away: TeamLine,
    pub detail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreRow {
    LeagueHeading(String),
    Event(EventRow),
}

/// What the display surface should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreView {
    Message(&'static str),
    Rows(Vec<ScoreRow>),
}

impl ScoreView {
    pub fn rows(&self) -> &[ScoreRow] {
        match self {
            ScoreView::Rows(rows) => rows,
            ScoreView::Message(_) => &[],
        }
    }

    /// Event rows only, in display order
    pub fn event_rows(&self) -> impl Iterator<Item = &EventRow> {
        self.rows().iter().filter_map(|row| match row {
            ScoreRow::Event(event) => Some(event),
            ScoreRow::LeagueHeading(_) => None,
        })
    }

    pub fn event_count(&self) -> usize {
        self.event_rows().count()
    }
}

fn team_line(event: &Event, side: Side, long_names: bool, endpoints: &Endpoints) -> TeamLine {
    let team = event.team(side);
    TeamLine {
        name: team_display_name(team, long_names).to_string(),
        score: score_text(event.score(side)).to_string(),
        logo_url: endpoints.team_logo(team.id),
        dimmed: is_dimmed(event.winner, side),
    }
}

pub fn event_row_in<Tz: TimeZone>(
    event: &Event,
    filters: &FilterState,
    endpoints: &Endpoints,
    tz: &Tz,
) -> EventRow {
    let long_names = filters.settings.long_names;
    EventRow {
        event_id: event.id,
        time: format_event_time_in(event.start_timestamp, tz),
        status: status_display(event.status()),
        home: team_line(event, Side::Home, long_names, endpoints),
        away: team_line(event, Side::Away, long_names, endpoints),
        detail_url: endpoints.event_detail(filters.settings.sport, &event.slug, &event.custom_id),
    }
}

/// Build display rows in the local timezone
pub fn present(selection: &Selection, filters: &FilterState, endpoints: &Endpoints) -> ScoreView {
    present_in(selection, filters, endpoints, &Local)
}

pub fn present_in<Tz: TimeZone>(
    selection: &Selection,
    filters: &FilterState,
    endpoints: &Endpoints,
    tz: &Tz,
) -> ScoreView {
    if let Some(message) = selection.message() {
        return ScoreView::Message(message);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();
    for event in selection.events() {
        if seen.insert(event.league()) {
            rows.push(ScoreRow::LeagueHeading(event.league().to_string()));
        }
        rows.push(ScoreRow::Event(event_row_in(event, filters, endpoints, tz)));
    }
    ScoreView::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{create_event, create_matchup, ts};
    use crate::selector::{select, NO_EVENTS_MESSAGE};
    use crate::settings::FilterSettings;
    use crate::types::Sport;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn filters(long_names: bool) -> FilterState {
        FilterState::new(
            FilterSettings {
                sport: Sport::Basketball,
                long_names,
                ..FilterSettings::default()
            },
            NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
        )
    }

    #[test]
    fn test_time_label_twelve_hour_clock() {
        assert_eq!(format_event_time_in(ts(2024, 11, 20, 0, 5), &Utc), "12:05 AM");
        assert_eq!(format_event_time_in(ts(2024, 11, 20, 9, 0), &Utc), "9:00 AM");
        assert_eq!(format_event_time_in(ts(2024, 11, 20, 12, 30), &Utc), "12:30 PM");
        assert_eq!(format_event_time_in(ts(2024, 11, 20, 23, 7), &Utc), "11:07 PM");
    }

    #[test]
    fn test_time_label_uses_timezone() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_event_time_in(ts(2024, 11, 21, 0, 30), &eastern), "7:30 PM");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventStatus::InProgress, "In Progress", StatusColor::Orange),
            (EventStatus::Finished, "Finished", StatusColor::Green),
            (EventStatus::NotStarted, "Not Started", StatusColor::White),
            (EventStatus::Postponed, "Postponed", StatusColor::Red),
            (EventStatus::Other("canceled".into()), "Unknown", StatusColor::Default),
        ];
        for (status, label, color) in cases {
            assert_eq!(status_display(&status), StatusDisplay { label, color });
        }
    }

    #[test]
    fn test_score_text_placeholder() {
        assert_eq!(score_text(None), "TBD");
        assert_eq!(score_text(Some(&Score::default())), "TBD");
        assert_eq!(score_text(Some(&Score::new(""))), "TBD");
        assert_eq!(score_text(Some(&Score::new("0"))), "0");
        assert_eq!(score_text(Some(&Score::new("6-4 7-5"))), "6-4 7-5");
    }

    #[test]
    fn test_losing_side_is_dimmed() {
        assert!(is_dimmed(Winner::Away, Side::Home));
        assert!(!is_dimmed(Winner::Away, Side::Away));
        assert!(is_dimmed(Winner::Home, Side::Away));
        assert!(!is_dimmed(Winner::Home, Side::Home));
        assert!(!is_dimmed(Winner::None, Side::Home));
        assert!(!is_dimmed(Winner::None, Side::Away));
    }

    #[test]
    fn test_winner_code_dims_loser() {
        // winnerCode 2: away won, so the home row is dimmed
        assert!(is_dimmed(Winner::from(2u8), Side::Home));
        assert!(!is_dimmed(Winner::from(2u8), Side::Away));
        // winnerCode 1: home won
        assert!(is_dimmed(Winner::from(1u8), Side::Away));
        // 3 is a draw
        assert!(!is_dimmed(Winner::from(3u8), Side::Home));
        assert!(!is_dimmed(Winner::from(3u8), Side::Away));
    }

    #[test]
    fn test_status_terminal_colors() {
        assert_eq!(StatusColor::Orange.terminal_color(), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(StatusColor::Red.terminal_color(), Some(Color::Red));
        assert_eq!(StatusColor::Default.terminal_color(), None);
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("Lakers", 10), "Lakers");
        assert_eq!(fit_width("Los Angeles Lakers", 10), "Los Angel…");
        assert_eq!(fit_width("Los Angeles Lakers", 0), "");
        assert_eq!(fit_width("東京ヤクルト", 5), "東京…");
    }

    #[test]
    fn test_league_headings_once_in_first_seen_order() {
        let start = ts(2024, 11, 20, 23, 0);
        let events = vec![
            create_event(1, "EuroLeague", EventStatus::NotStarted, start),
            create_event(2, "NBA", EventStatus::NotStarted, start),
            create_event(3, "EuroLeague", EventStatus::NotStarted, start),
            create_event(4, "NBA", EventStatus::NotStarted, start),
        ];
        let f = filters(false);
        let selection = select(&events, &f);
        let view = present_in(&selection, &f, &Endpoints::default(), &Utc);

        let headings: Vec<&str> = view
            .rows()
            .iter()
            .filter_map(|row| match row {
                ScoreRow::LeagueHeading(name) => Some(name.as_str()),
                ScoreRow::Event(_) => None,
            })
            .collect();
        assert_eq!(headings, vec!["NBA", "EuroLeague"]);
        assert_eq!(view.event_count(), 4);
        assert!(matches!(&view.rows()[0], ScoreRow::LeagueHeading(name) if name == "NBA"));
    }

    #[test]
    fn test_event_row_contents() {
        let event = create_matchup(
            7,
            "NBA",
            EventStatus::Finished,
            ts(2024, 11, 20, 20, 0),
            ("Boston Celtics", "Celtics"),
            ("Los Angeles Lakers", "Lakers"),
            Some(("98", "102")),
            Winner::Away,
        );
        let row = event_row_in(&event, &filters(false), &Endpoints::default(), &Utc);

        assert_eq!(row.time, "8:00 PM");
        assert_eq!(row.status.label, "Finished");
        assert_eq!(row.home.name, "Celtics");
        assert_eq!(row.home.score, "98");
        assert!(row.home.dimmed);
        assert_eq!(row.away.name, "Lakers");
        assert!(!row.away.dimmed);
        assert_eq!(row.home.logo_url, "https://api.sofascore.app/api/v1/team/71/image");
        assert_eq!(
            row.detail_url,
            "https://www.sofascore.com/basketball/match/boston-celtics-los-angeles-lakers/c7"
        );
    }

    #[test]
    fn test_long_names_switch_labels_only() {
        let start = ts(2024, 11, 20, 23, 0);
        let events = vec![
            create_event(1, "NBA", EventStatus::InProgress, start),
            create_event(2, "EuroLeague", EventStatus::NotStarted, start),
        ];

        let short = filters(false);
        let long = filters(true);
        let short_view = present_in(&select(&events, &short), &short, &Endpoints::default(), &Utc);
        let long_view = present_in(&select(&events, &long), &long, &Endpoints::default(), &Utc);

        let short_rows: Vec<&EventRow> = short_view.event_rows().collect();
        let long_rows: Vec<&EventRow> = long_view.event_rows().collect();
        assert_eq!(short_rows.len(), long_rows.len());
        for (s, l) in short_rows.iter().zip(&long_rows) {
            assert_eq!(s.event_id, l.event_id);
            assert!(s.home.name.starts_with("Home "));
            assert!(l.home.name.starts_with("Home Team "));
        }
    }

    #[test]
    fn test_empty_selection_presents_message() {
        let f = filters(false);
        let view = present_in(&select(&[], &f), &f, &Endpoints::default(), &Utc);
        assert_eq!(view, ScoreView::Message(NO_EVENTS_MESSAGE));
        assert_eq!(view.event_count(), 0);
    }
}
