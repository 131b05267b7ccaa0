/// Fixture data for tests, benchmarks and the development mock client
///
/// Deterministic events covering every status, both winner codes, empty
/// scores and a mix of major and minor leagues.
use chrono::NaiveDate;

use crate::types::{Event, EventList, EventStatus, Score, Sport, StatusInfo, Team, Tournament, Winner};

/// Epoch seconds for a UTC wall-clock time
pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

fn team(id: i64, name: &str, short_name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        short_name: Some(short_name.to_string()),
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// A matchup with explicit teams, scores and winner
#[allow(clippy::too_many_arguments)]
pub fn create_matchup(
    id: i64,
    league: &str,
    status: EventStatus,
    start_timestamp: i64,
    home: (&str, &str),
    away: (&str, &str),
    scores: Option<(&str, &str)>,
    winner: Winner,
) -> Event {
    let home_team = team(id * 10 + 1, home.0, home.1);
    let away_team = team(id * 10 + 2, away.0, away.1);
    let (home_score, away_score) = match scores {
        Some((h, a)) => (Score::new(h), Score::new(a)),
        None => (Score::default(), Score::default()),
    };

    Event {
        id,
        start_timestamp,
        status: StatusInfo { kind: status },
        tournament: Tournament {
            name: league.to_string(),
        },
        slug: format!("{}-{}", slugify(home.0), slugify(away.0)),
        custom_id: format!("c{}", id),
        home_team,
        away_team,
        home_score: Some(home_score),
        away_score: Some(away_score),
        winner,
    }
}

/// A generic event; started events get a 2-1 home lead
pub fn create_event(id: i64, league: &str, status: EventStatus, start_timestamp: i64) -> Event {
    let scores = match status {
        EventStatus::InProgress | EventStatus::Finished => Some(("2", "1")),
        _ => None,
    };
    let winner = if status == EventStatus::Finished {
        Winner::Home
    } else {
        Winner::None
    };
    let home = format!("Home Team {}", id);
    let away = format!("Away Team {}", id);
    let home_short = format!("Home {}", id);
    let away_short = format!("Away {}", id);
    create_matchup(
        id,
        league,
        status,
        start_timestamp,
        (&home, &home_short),
        (&away, &away_short),
        scores,
        winner,
    )
}

fn leagues_for(sport: Sport) -> (&'static str, &'static str) {
    match sport {
        Sport::AmericanFootball => ("NFL", "NCAA Division I, FBS"),
        Sport::Basketball => ("NBA", "EuroLeague"),
        Sport::Baseball => ("MLB", "KBO League"),
        Sport::IceHockey => ("NHL", "AHL"),
        Sport::Football => ("MLS", "Premier League"),
        Sport::Tennis => ("ATP Paris, France", "WTA Finals"),
    }
}

/// Mock schedule for a sport and date, one event per status
pub fn create_mock_events(sport: Sport, date: NaiveDate) -> EventList {
    use chrono::Datelike;

    let (major, minor) = leagues_for(sport);
    let (y, m, d) = (date.year(), date.month(), date.day());
    let base = ts(y, m, d, 0, 0);
    let hour = 3600;

    let events = vec![
        create_matchup(
            1,
            minor,
            EventStatus::Finished,
            base + 16 * hour,
            ("Riverside Rapids", "Rapids"),
            ("Harbor City Gulls", "Gulls"),
            Some(("3", "4")),
            Winner::Away,
        ),
        create_matchup(
            2,
            major,
            EventStatus::Finished,
            base + 20 * hour,
            ("Boston Celtics", "Celtics"),
            ("Los Angeles Lakers", "Lakers"),
            Some(("98", "102")),
            Winner::Away,
        ),
        create_matchup(
            3,
            major,
            EventStatus::InProgress,
            base + 23 * hour,
            ("Toronto Raptors", "Raptors"),
            ("Miami Heat", "Heat"),
            Some(("55", "49")),
            Winner::None,
        ),
        create_matchup(
            4,
            minor,
            EventStatus::NotStarted,
            base + 25 * hour,
            ("Northside Owls", "Owls"),
            ("Valley Foxes", "Foxes"),
            None,
            Winner::None,
        ),
        create_matchup(
            5,
            major,
            EventStatus::Postponed,
            base + 26 * hour,
            ("Denver Nuggets", "Nuggets"),
            ("Utah Jazz", "Jazz"),
            None,
            Winner::None,
        ),
        create_matchup(
            6,
            minor,
            EventStatus::Other("canceled".to_string()),
            base + 18 * hour,
            ("Lakeshore Pilots", "Pilots"),
            ("Mountain Goats", "Goats"),
            None,
            Winner::None,
        ),
    ];

    EventList { events }
}
