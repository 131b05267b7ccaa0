use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::Color;

pub const DEFAULT_API_BASE_URL: &str = "https://api.sofascore.com/api/v1";
pub const DEFAULT_APP_BASE_URL: &str = "https://api.sofascore.app/api/v1";
pub const DEFAULT_WEBSITE_BASE_URL: &str = "https://www.sofascore.com";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Seconds between timer-driven refreshes
    pub refresh_interval: u32,
    /// Per-request timeout in seconds; 0 leaves the transport default
    pub request_timeout: u32,
    pub api_base_url: String,
    pub app_base_url: String,
    pub website_base_url: String,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            refresh_interval: 60,
            request_timeout: 0,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_base_url: DEFAULT_APP_BASE_URL.to_string(),
            website_base_url: DEFAULT_WEBSITE_BASE_URL.to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            heading_fg: Color::White,
        }
    }
}

impl Config {
    /// Refresh period, never shorter than one second
    pub fn refresh_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.refresh_interval.max(1)))
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return None,
        };
        let r = u8::from_str_radix(expanded.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(expanded.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(expanded.get(4..6)?, 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() == 3 {
        let r = parts[0].trim().parse::<u8>().ok()?;
        let g = parts[1].trim().parse::<u8>().ok()?;
        let b = parts[2].trim().parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed config {}: {}", config_path.display(), e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("ORANGE"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("Grey"), Some(Color::Gray));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#GGGGGG"), None);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("invalid"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.refresh_period(), std::time::Duration::from_secs(60));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r##"
refresh_interval = 30
website_base_url = "https://example.test"

[theme]
heading_fg = "#00FFFF"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.website_base_url, "https://example.test");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.theme.heading_fg, Color::Rgb(0, 255, 255));
        assert_eq!(config.theme.selection_fg, Color::Rgb(255, 165, 0));
    }

    #[test]
    fn test_zero_refresh_interval_is_clamped() {
        let config = Config {
            refresh_interval: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_period(), std::time::Duration::from_secs(1));
    }
}
