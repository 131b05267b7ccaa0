/// Wire model for the scheduled-events API
///
/// These types mirror the JSON returned by
/// `GET {api}/sport/{sport}/scheduled-events/{date}`. Only the fields the
/// selector and presenter need are modeled; everything else is ignored.
use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Deserializer};

use crate::error::UnknownSport;

/// Supported sport keys, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sport {
    #[default]
    AmericanFootball,
    Basketball,
    Baseball,
    IceHockey,
    Football,
    Tennis,
}

static SPORT_KEYS: phf::Map<&'static str, Sport> = phf_map! {
    "american-football" => Sport::AmericanFootball,
    "basketball" => Sport::Basketball,
    "baseball" => Sport::Baseball,
    "ice-hockey" => Sport::IceHockey,
    "football" => Sport::Football,
    "tennis" => Sport::Tennis,
};

impl Sport {
    pub const ALL: [Sport; 6] = [
        Sport::AmericanFootball,
        Sport::Basketball,
        Sport::Baseball,
        Sport::IceHockey,
        Sport::Football,
        Sport::Tennis,
    ];

    /// Key used in API paths, website links and the settings store
    pub fn key(self) -> &'static str {
        match self {
            Sport::AmericanFootball => "american-football",
            Sport::Basketball => "basketball",
            Sport::Baseball => "baseball",
            Sport::IceHockey => "ice-hockey",
            Sport::Football => "football",
            Sport::Tennis => "tennis",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sport::AmericanFootball => "American Football",
            Sport::Basketball => "Basketball",
            Sport::Baseball => "Baseball",
            Sport::IceHockey => "Ice Hockey",
            Sport::Football => "Soccer",
            Sport::Tennis => "Tennis",
        }
    }

    pub fn from_key(key: &str) -> Option<Sport> {
        SPORT_KEYS.get(key).copied()
    }

    fn position(self) -> usize {
        Sport::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next sport in selection order, wrapping around
    pub fn next(self) -> Sport {
        Sport::ALL[(self.position() + 1) % Sport::ALL.len()]
    }

    /// Previous sport in selection order, wrapping around
    pub fn previous(self) -> Sport {
        let len = Sport::ALL.len();
        Sport::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Sport {
    type Err = UnknownSport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::from_key(s.trim()).ok_or_else(|| UnknownSport(s.to_string()))
    }
}

/// Event lifecycle state, from `status.type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EventStatus {
    NotStarted,
    InProgress,
    Finished,
    Postponed,
    /// Any other wire value (canceled, interrupted, ...), kept verbatim
    Other(String),
}

impl From<String> for EventStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "notstarted" => EventStatus::NotStarted,
            "inprogress" => EventStatus::InProgress,
            "finished" => EventStatus::Finished,
            "postponed" => EventStatus::Postponed,
            _ => EventStatus::Other(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusInfo {
    #[serde(rename = "type")]
    pub kind: EventStatus,
}

/// Winner indicator from `winnerCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<u8>")]
pub enum Winner {
    #[default]
    None,
    Home,
    Away,
}

impl From<u8> for Winner {
    fn from(code: u8) -> Self {
        match code {
            1 => Winner::Home,
            2 => Winner::Away,
            _ => Winner::None,
        }
    }
}

impl From<Option<u8>> for Winner {
    fn from(code: Option<u8>) -> Self {
        code.map(Winner::from).unwrap_or_default()
    }
}

/// Which side of a matchup a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

impl Team {
    /// Short name, falling back to the full name when the API omits it
    pub fn short_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tournament {
    pub name: String,
}

/// A team's score; `display` is absent until a score is recorded
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Score {
    #[serde(default, deserialize_with = "deserialize_display")]
    pub display: Option<String>,
}

impl Score {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
        }
    }
}

/// `display` arrives as a number for most sports and as a string for some
fn deserialize_display<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDisplay {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw: Option<RawDisplay> = Option::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        RawDisplay::Int(n) => n.to_string(),
        RawDisplay::Float(n) => n.to_string(),
        RawDisplay::Text(s) => s,
    }))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub start_timestamp: i64,
    pub status: StatusInfo,
    pub tournament: Tournament,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub home_score: Option<Score>,
    #[serde(default)]
    pub away_score: Option<Score>,
    #[serde(default, rename = "winnerCode")]
    pub winner: Winner,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub custom_id: String,
}

impl Event {
    pub fn league(&self) -> &str {
        &self.tournament.name
    }

    pub fn status(&self) -> &EventStatus {
        &self.status.kind
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn score(&self, side: Side) -> Option<&Score> {
        match side {
            Side::Home => self.home_score.as_ref(),
            Side::Away => self.away_score.as_ref(),
        }
    }
}

/// Response body of the scheduled-events endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<Event>,
}
