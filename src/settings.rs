//! Persisted user preferences
//!
//! Four string-valued keys live in a small key-value store. Booleans are
//! stored as `"true"`/`"false"`; anything else reads back as false. The
//! default store is a TOML table under the XDG data directory.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};
use xdg::BaseDirectories;

use crate::error::SettingsError;
use crate::types::Sport;

pub const KEY_SPORT: &str = "selectedSport";
pub const KEY_HIDE_FINISHED: &str = "hideFinished";
pub const KEY_HIDE_NOT_STARTED: &str = "hideNotStarted";
pub const KEY_LONG_NAMES: &str = "longnames";

pub const KEYS: [&str; 4] = [KEY_SPORT, KEY_HIDE_FINISHED, KEY_HIDE_NOT_STARTED, KEY_LONG_NAMES];

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// String key-value persistence
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
    fn clear(&self) -> Result<(), SettingsError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Volatile store for tests and one-shot runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SettingsError> {
        lock(&self.values).clear();
        Ok(())
    }
}

/// TOML-file-backed store; every `set` writes the whole table through
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A file that fails to decode is logged and
    /// treated as empty so the next `set` rewrites it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            decode_values(&path, &content)
        } else {
            BTreeMap::new()
        };
        debug!("SETTINGS: opened {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// `$XDG_DATA_HOME/sidescore/settings.toml`
    pub fn open_default() -> Result<Self, SettingsError> {
        let path = default_settings_path().ok_or(SettingsError::NoDataDir)?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling temp file, then rename over the real one
        let tmp_path = self.temp_path();
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(toml::to_string(values)?.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!("SETTINGS: saved {} ({} keys)", self.path.display(), values.len());
        Ok(())
    }
}

/// Non-string TOML values (a hand-written `hideFinished = true`) keep their
/// textual form
fn decode_values(path: &Path, content: &str) -> BTreeMap<String, String> {
    match toml::from_str::<toml::Table>(content) {
        Ok(table) => table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
        Err(e) => {
            warn!("SETTINGS: ignoring unreadable {}: {}", path.display(), e);
            BTreeMap::new()
        }
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = lock(&self.values);
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }

    fn clear(&self) -> Result<(), SettingsError> {
        let mut values = lock(&self.values);
        values.clear();
        self.write(&values)
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    let xdg_dirs = BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    let data_home = xdg_dirs.get_data_home()?;
    Some(data_home.join(SETTINGS_FILE_NAME))
}

/// The persisted preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub sport: Sport,
    pub hide_finished: bool,
    pub hide_not_started: bool,
    pub long_names: bool,
}

fn read_flag(store: &dyn SettingsStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

fn flag_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl FilterSettings {
    /// Load from the store; missing or unrecognized values fall back to defaults
    pub fn load(store: &dyn SettingsStore) -> Self {
        let sport = match store.get(KEY_SPORT) {
            Some(key) => key.parse().unwrap_or_else(|e| {
                warn!("SETTINGS: {}, using default sport", e);
                Sport::default()
            }),
            None => Sport::default(),
        };

        Self {
            sport,
            hide_finished: read_flag(store, KEY_HIDE_FINISHED),
            hide_not_started: read_flag(store, KEY_HIDE_NOT_STARTED),
            long_names: read_flag(store, KEY_LONG_NAMES),
        }
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(KEY_SPORT, self.sport.key())?;
        store.set(KEY_HIDE_FINISHED, flag_str(self.hide_finished))?;
        store.set(KEY_HIDE_NOT_STARTED, flag_str(self.hide_not_started))?;
        store.set(KEY_LONG_NAMES, flag_str(self.long_names))?;
        Ok(())
    }

    /// Stored string form of one key, as it would be persisted
    pub fn value_of(&self, key: &str) -> Option<&'static str> {
        match key {
            KEY_SPORT => Some(self.sport.key()),
            KEY_HIDE_FINISHED => Some(flag_str(self.hide_finished)),
            KEY_HIDE_NOT_STARTED => Some(flag_str(self.hide_not_started)),
            KEY_LONG_NAMES => Some(flag_str(self.long_names)),
            _ => None,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Validate and persist a single user-supplied setting
pub fn set_value(store: &dyn SettingsStore, key: &str, value: &str) -> Result<(), SettingsError> {
    match key {
        KEY_SPORT => {
            let sport: Sport = value.parse()?;
            store.set(key, sport.key())
        }
        KEY_HIDE_FINISHED | KEY_HIDE_NOT_STARTED | KEY_LONG_NAMES => {
            store.set(key, flag_str(parse_flag(key, value)?))
        }
        _ => Err(SettingsError::UnknownKey(key.to_string())),
    }
}
