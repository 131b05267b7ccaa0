use anyhow::{Context, Result};

use crate::settings::{self, FilterSettings, SettingsStore, KEYS};

/// Render the persisted settings, one `key: value` per line
pub fn format_settings(store: &dyn SettingsStore) -> String {
    let current = FilterSettings::load(store);
    let mut output = String::new();
    for key in KEYS {
        let value = current.value_of(key).unwrap_or_default();
        let marker = if store.get(key).is_some() { "" } else { " (default)" };
        output.push_str(&format!("{}: {}{}\n", key, value, marker));
    }
    output
}

pub fn show(store: &dyn SettingsStore, location: Option<&str>) {
    if let Some(location) = location {
        println!("Settings File: {}", location);
        println!();
    }
    print!("{}", format_settings(store));
}

pub fn set(store: &dyn SettingsStore, key: &str, value: &str) -> Result<()> {
    settings::set_value(store, key, value).with_context(|| format!("Failed to set {}", key))?;
    tracing::info!("SETTINGS: {} = {}", key, value);
    print!("{}", format_settings(store));
    Ok(())
}

pub fn reset(store: &dyn SettingsStore) -> Result<()> {
    store.clear().context("Failed to reset settings")?;
    tracing::info!("SETTINGS: reset to defaults");
    print!("{}", format_settings(store));
    Ok(())
}
