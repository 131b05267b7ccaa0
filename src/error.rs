use thiserror::Error;

/// Errors surfaced by the event fetcher
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure, or the server answered with a non-success status
    #[error("Network response was not ok for {url}: {reason}")]
    Network {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// The body was not a valid event list
    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ApiError::Parse { .. })
    }
}

/// Errors reading or writing the persisted settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unable to determine settings directory")]
    NoDataDir,

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Unknown setting '{0}'")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    UnknownSport(#[from] UnknownSport),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sport '{0}'")]
pub struct UnknownSport(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_kind() {
        let err = ApiError::Network {
            url: "http://x/sport/basketball/scheduled-events/2024-11-20".to_string(),
            status: Some(503),
            reason: "HTTP 503".to_string(),
        };
        assert!(err.is_network());
        assert!(!err.is_parse());
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_parse_error_kind() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ApiError::Parse {
            url: "http://x".to_string(),
            source,
        };
        assert!(err.is_parse());
        assert!(!err.is_network());
    }
}
