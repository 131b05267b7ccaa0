/// Renders `AppState` into a ratatui frame
///
/// Layout, top to bottom:
/// - Header: sport, date and filter toggles
/// - Body: league headings and two-line event rows, or a message
/// - Status bar: separator, then last refresh / status message / key hints
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::state::AppState;
use crate::config::ThemeConfig;
use crate::formatting::{
    fit_width, EventRow, ScoreRow, ScoreView, TeamLine, INFO_COL_WIDTH, SCORE_COL_WIDTH, TEAM_NAME_WIDTH,
};

const HEADER_HEIGHT: u16 = 2;
const STATUS_BAR_HEIGHT: u16 = 2;

const KEY_HINTS: &str = "s sport  ←/→ date  f/n/l filters  r refresh  ⏎ open  q quit";

const LOADING_MESSAGE: &str = "Loading...";

pub fn render(frame: &mut Frame, state: &AppState, theme: &ThemeConfig) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    render_header(frame, header, state, theme);
    render_body(frame, body, state, theme);
    render_status_bar(frame, status, state);
}

fn toggle_span(label: &'static str, enabled: bool) -> Span<'static> {
    let marker = if enabled { "[x] " } else { "[ ] " };
    let style = if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Span::styled(format!("{}{}", marker, label), style)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &ThemeConfig) {
    let settings = &state.filters.settings;
    let title = Line::from(vec![
        Span::styled(
            settings.sport.display_name(),
            Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(state.filters.date.format("%a %Y-%m-%d").to_string()),
    ]);
    let toggles = Line::from(vec![
        toggle_span("Hide finished", settings.hide_finished),
        Span::raw("  "),
        toggle_span("Hide not started", settings.hide_not_started),
        Span::raw("  "),
        toggle_span("Long names", settings.long_names),
    ]);
    frame.render_widget(Paragraph::new(vec![title, toggles]), area);
}

fn team_spans(info: Span<'static>, team: &TeamLine) -> Line<'static> {
    let style = if team.dimmed {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(" "),
        info,
        Span::raw(" "),
        Span::styled(
            format!("{:<width$}", fit_width(&team.name, TEAM_NAME_WIDTH), width = TEAM_NAME_WIDTH),
            style,
        ),
        Span::styled(format!("{:>width$}", team.score, width = SCORE_COL_WIDTH), style),
    ])
}

fn event_item(row: &EventRow) -> ListItem<'static> {
    let time = Span::raw(format!("{:<width$}", row.time, width = INFO_COL_WIDTH));
    let mut status_style = Style::default();
    if let Some(color) = row.status.color.terminal_color() {
        status_style = status_style.fg(color);
    }
    let status = Span::styled(format!("{:<width$}", row.status.label, width = INFO_COL_WIDTH), status_style);

    ListItem::new(Text::from(vec![
        team_spans(time, &row.home),
        team_spans(status, &row.away),
    ]))
}

/// List items plus the list index of each event row
fn list_items(rows: &[ScoreRow], theme: &ThemeConfig) -> (Vec<ListItem<'static>>, Vec<usize>) {
    let mut items = Vec::with_capacity(rows.len());
    let mut event_indices = Vec::new();
    for row in rows {
        match row {
            ScoreRow::LeagueHeading(league) => {
                items.push(ListItem::new(Line::from(Span::styled(
                    league.clone(),
                    Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
                ))));
            }
            ScoreRow::Event(event) => {
                event_indices.push(items.len());
                items.push(event_item(event));
            }
        }
    }
    (items, event_indices)
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState, theme: &ThemeConfig) {
    let view = match &state.view {
        Some(view) => view,
        None => {
            let text = if state.loading { LOADING_MESSAGE } else { "" };
            frame.render_widget(Paragraph::new(text), area);
            return;
        }
    };

    match view {
        ScoreView::Message(message) => {
            frame.render_widget(Paragraph::new(format!("\n {}", message)), area);
        }
        ScoreView::Rows(rows) => {
            let (items, event_indices) = list_items(rows, theme);
            let mut list_state =
                ListState::default().with_selected(state.selected.and_then(|i| event_indices.get(i).copied()));
            let list = List::new(items).highlight_style(
                Style::default()
                    .fg(theme.selection_fg)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let separator = Line::from("─".repeat(area.width as usize));

    let mut spans = Vec::new();
    match &state.last_refresh {
        Some(time) => spans.push(Span::raw(format!(" Updated {}", time.format("%H:%M:%S")))),
        None => spans.push(Span::raw(" Not updated yet")),
    }
    if state.loading {
        spans.push(Span::styled(" ⟳", Style::default().add_modifier(Modifier::DIM)));
    }
    if let Some(message) = &state.status.message {
        spans.push(Span::raw("  "));
        if state.status.is_error {
            spans.push(Span::styled(format!("ERROR: {}", message), Style::default().fg(Color::Red)));
        } else {
            spans.push(Span::raw(message.clone()));
        }
    }
    spans.push(Span::styled(
        format!("  {}", KEY_HINTS),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(vec![separator, Line::from(spans)]), area);
}
