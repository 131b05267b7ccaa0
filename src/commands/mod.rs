pub mod scores;
pub mod settings;
pub mod watch;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::selector::FilterState;
use crate::settings::{FilterSettings, SettingsStore};
use crate::types::Sport;

/// Parse optional date string, defaulting to today
///
/// Accepts dates in YYYY-MM-DD format. If no date is provided, returns today's local date.
/// Returns an error if the date string is malformed.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Command-line overrides for a scores run
///
/// Flags only switch options on; anything left unset falls back to the
/// persisted settings.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub sport: Option<String>,
    pub date: Option<String>,
    pub hide_finished: bool,
    pub hide_not_started: bool,
    pub long_names: bool,
    pub links: bool,
}

impl ScoreOptions {
    pub fn resolve(&self, store: &dyn SettingsStore) -> Result<FilterState> {
        let saved = FilterSettings::load(store);
        let sport = match &self.sport {
            Some(key) => key.parse::<Sport>()?,
            None => saved.sport,
        };
        let settings = FilterSettings {
            sport,
            hide_finished: self.hide_finished || saved.hide_finished,
            hide_not_started: self.hide_not_started || saved.hide_not_started,
            long_names: self.long_names || saved.long_names,
        };
        Ok(FilterState::new(settings, parse_date(self.date.as_deref())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-11-20")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
        );
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
        let err = parse_date(Some("20/11/2024")).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_options_fall_back_to_saved_settings() {
        let store = MemoryStore::new();
        FilterSettings {
            sport: Sport::IceHockey,
            hide_finished: true,
            hide_not_started: false,
            long_names: false,
        }
        .save(&store)
        .unwrap();

        let options = ScoreOptions {
            date: Some("2024-11-20".to_string()),
            long_names: true,
            ..ScoreOptions::default()
        };
        let filters = options.resolve(&store).unwrap();
        assert_eq!(filters.settings.sport, Sport::IceHockey);
        assert!(filters.settings.hide_finished);
        assert!(!filters.settings.hide_not_started);
        assert!(filters.settings.long_names);
    }

    #[test]
    fn test_options_sport_override_and_validation() {
        let store = MemoryStore::new();
        let options = ScoreOptions {
            sport: Some("baseball".to_string()),
            ..ScoreOptions::default()
        };
        assert_eq!(options.resolve(&store).unwrap().settings.sport, Sport::Baseball);

        let bad = ScoreOptions {
            sport: Some("quidditch".to_string()),
            ..ScoreOptions::default()
        };
        assert!(bad.resolve(&store).is_err());
    }
}
