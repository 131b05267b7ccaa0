/// Mock events client for development and testing
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::client::Endpoints;
use crate::data_provider::EventsProvider;
use crate::error::ApiError;
use crate::fixtures;
use crate::types::{EventList, Sport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Fixtures,
    Empty,
    NetworkFailure,
    MalformedBody,
}

/// Mock client that returns fixture data instead of making real API calls
pub struct MockClient {
    mode: Mode,
    endpoints: Endpoints,
    calls: AtomicUsize,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    /// Returns `fixtures::create_mock_events` for every request
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self::with_mode(Mode::Fixtures)
    }

    /// Returns an empty event list
    pub fn empty() -> Self {
        Self::with_mode(Mode::Empty)
    }

    /// Fails every request with a network error
    pub fn failing() -> Self {
        Self::with_mode(Mode::NetworkFailure)
    }

    /// Fails every request with a parse error
    pub fn malformed() -> Self {
        Self::with_mode(Mode::MalformedBody)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            endpoints: Endpoints::default(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventsProvider for MockClient {
    async fn scheduled_events(&self, sport: Sport, date: NaiveDate) -> Result<EventList, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = self.endpoints.scheduled_events(sport, date);
        info!("MockClient: scheduled events for {} on {}", sport, date);

        match self.mode {
            Mode::Fixtures => Ok(fixtures::create_mock_events(sport, date)),
            Mode::Empty => Ok(EventList::default()),
            Mode::NetworkFailure => Err(ApiError::Network {
                url,
                status: Some(503),
                reason: "HTTP 503 Service Unavailable".to_string(),
            }),
            Mode::MalformedBody => crate::client::parse_event_list(&url, "<html>"),
        }
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}
