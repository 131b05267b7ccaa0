use std::io::IsTerminal;

use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};

use crate::commands::ScoreOptions;
use crate::data_provider::EventsProvider;
use crate::error::ApiError;
use crate::formatting::{
    self, EventRow, ScoreRow, ScoreView, TeamLine, INFO_COL_WIDTH, SCORE_COL_WIDTH, TEAM_NAME_WIDTH,
};
use crate::selector::{self, FilterState};
use crate::settings::SettingsStore;
use crate::types::EventList;

const HEADER_SEPARATOR_WIDTH: usize = 2 + INFO_COL_WIDTH + 1 + TEAM_NAME_WIDTH + SCORE_COL_WIDTH;

/// Select and present an already fetched list
pub fn build_view(list: &EventList, filters: &FilterState, provider: &dyn EventsProvider) -> ScoreView {
    let selection = selector::select(&list.events, filters);
    formatting::present(&selection, filters, provider.endpoints())
}

/// One fetch/select/present pass
pub async fn fetch_view(provider: &dyn EventsProvider, filters: &FilterState) -> Result<ScoreView, ApiError> {
    let list = provider
        .scheduled_events(filters.settings.sport, filters.date)
        .await?;
    Ok(build_view(&list, filters, provider))
}

fn format_team_line(info: &str, info_color: Option<Color>, team: &TeamLine, styled: bool) -> String {
    let info = format!("{:<width$}", info, width = INFO_COL_WIDTH);
    let body = format!(
        "{:<name_width$}{:>score_width$}",
        formatting::fit_width(&team.name, TEAM_NAME_WIDTH),
        team.score,
        name_width = TEAM_NAME_WIDTH,
        score_width = SCORE_COL_WIDTH
    );

    if !styled {
        return format!("  {} {}", info, body);
    }
    let info = match info_color {
        Some(color) => info.with(color).to_string(),
        None => info,
    };
    let body = if team.dimmed {
        body.dim().to_string()
    } else {
        body
    };
    format!("  {} {}", info, body)
}

fn format_event(row: &EventRow, styled: bool, links: bool) -> String {
    let mut output = String::new();
    output.push_str(&format_team_line(&row.time, None, &row.home, styled));
    output.push('\n');
    output.push_str(&format_team_line(
        row.status.label,
        row.status.color.terminal_color().map(Color::from),
        &row.away,
        styled,
    ));
    output.push('\n');
    if links {
        let link = format!("  {:<width$} {}", "", row.detail_url, width = INFO_COL_WIDTH);
        if styled {
            output.push_str(&link.dim().to_string());
        } else {
            output.push_str(&link);
        }
        output.push('\n');
    }
    output
}

/// Render a view as plain or ANSI-styled text
pub fn format_scores(view: &ScoreView, filters: &FilterState, styled: bool, links: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{} - {}\n",
        filters.settings.sport.display_name(),
        filters.date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("{}\n", "═".repeat(HEADER_SEPARATOR_WIDTH)));

    match view {
        ScoreView::Message(message) => {
            output.push_str(&format!("\n{}\n", message));
        }
        ScoreView::Rows(rows) => {
            for row in rows {
                match row {
                    ScoreRow::LeagueHeading(league) => {
                        let heading = if styled {
                            league.as_str().bold().to_string()
                        } else {
                            league.clone()
                        };
                        output.push_str(&format!("\n{}\n", heading));
                    }
                    ScoreRow::Event(event) => {
                        output.push_str(&format_event(event, styled, links));
                    }
                }
            }
        }
    }
    output
}

pub async fn run(provider: &dyn EventsProvider, store: &dyn SettingsStore, options: &ScoreOptions) -> Result<()> {
    let filters = options.resolve(store)?;
    let view = fetch_view(provider, &filters)
        .await
        .context("Failed to fetch events")?;

    let styled = std::io::stdout().is_terminal();
    print!("{}", format_scores(&view, &filters, styled, options.links));
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::selector::{NO_EVENTS_MESSAGE, NO_MATCHES_MESSAGE};
    use crate::settings::{FilterSettings, MemoryStore};
    use crate::types::Sport;
    use chrono::NaiveDate;

    fn filters(settings: FilterSettings) -> FilterState {
        FilterState::new(settings, NaiveDate::from_ymd_opt(2024, 11, 20).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_view_orders_major_first() {
        let client = MockClient::new();
        let f = filters(FilterSettings {
            sport: Sport::Basketball,
            ..FilterSettings::default()
        });
        let view = fetch_view(&client, &f).await.unwrap();

        assert!(matches!(&view.rows()[0], ScoreRow::LeagueHeading(name) if name == "NBA"));
        let ids: Vec<i64> = view.event_rows().map(|r| r.event_id).collect();
        assert_eq!(ids, vec![2, 3, 5, 1, 4, 6]);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_view_messages() {
        let f = filters(FilterSettings::default());
        let empty = fetch_view(&MockClient::empty(), &f).await.unwrap();
        assert_eq!(empty, ScoreView::Message(NO_EVENTS_MESSAGE));

        let hide_everything = filters(FilterSettings {
            hide_finished: true,
            hide_not_started: true,
            ..FilterSettings::default()
        });
        let mut list = crate::fixtures::create_mock_events(Sport::Basketball, hide_everything.date);
        list.events.retain(|e| {
            matches!(
                e.status(),
                crate::types::EventStatus::Finished | crate::types::EventStatus::NotStarted
            )
        });
        let view = build_view(&list, &hide_everything, &MockClient::empty());
        assert_eq!(view, ScoreView::Message(NO_MATCHES_MESSAGE));
    }

    #[tokio::test]
    async fn test_fetch_view_propagates_errors() {
        let f = filters(FilterSettings::default());
        assert!(fetch_view(&MockClient::failing(), &f).await.unwrap_err().is_network());
        assert!(fetch_view(&MockClient::malformed(), &f).await.unwrap_err().is_parse());
    }

    #[tokio::test]
    async fn test_format_scores_plain_text() {
        let client = MockClient::new();
        let f = filters(FilterSettings {
            sport: Sport::Basketball,
            hide_not_started: true,
            ..FilterSettings::default()
        });
        let view = fetch_view(&client, &f).await.unwrap();
        let output = format_scores(&view, &f, false, false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[1], "Basketball - 2024-11-20");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "NBA");
        assert!(lines[5].contains("Celtics"));
        assert!(lines[5].ends_with("98"));
        assert!(lines[6].starts_with("  Finished"));
        assert!(lines[6].contains("Lakers"));
        assert!(lines[6].ends_with("102"));
        assert!(!output.contains("Owls"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_format_scores_message() {
        let f = filters(FilterSettings::default());
        let output = format_scores(&ScoreView::Message(NO_EVENTS_MESSAGE), &f, false, false);
        assert!(output.contains("American Football - 2024-11-20"));
        assert!(output.trim_end().ends_with(NO_EVENTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_format_scores_links_and_placeholder() {
        let f = filters(FilterSettings {
            sport: Sport::IceHockey,
            ..FilterSettings::default()
        });
        let view = fetch_view(&MockClient::new(), &f).await.unwrap();
        let output = format_scores(&view, &f, false, true);
        assert!(output.contains("https://www.sofascore.com/ice-hockey/match/"));
        assert!(output.contains("TBD"));
    }

    #[tokio::test]
    async fn test_run_uses_persisted_settings() {
        let store = MemoryStore::new();
        let options = ScoreOptions {
            date: Some("2024-11-20".to_string()),
            ..ScoreOptions::default()
        };
        let client = MockClient::new();
        run(&client, &store, &options).await.unwrap();
        assert_eq!(client.calls(), 1);

        assert!(run(&MockClient::failing(), &store, &options).await.is_err());
    }
}
