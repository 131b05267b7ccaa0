/// Trait for providing event data, abstracting over the real API client and mock implementations
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::{Client, Endpoints};
use crate::error::ApiError;
use crate::types::{EventList, Sport};

/// Event data providers, implemented by both the real Client and MockClient
#[async_trait]
pub trait EventsProvider: Send + Sync {
    /// Get scheduled events for a sport on a date
    async fn scheduled_events(&self, sport: Sport, date: NaiveDate) -> Result<EventList, ApiError>;

    /// URL templates used to build logo and detail links
    fn endpoints(&self) -> &Endpoints;
}

#[async_trait]
impl EventsProvider for Client {
    async fn scheduled_events(&self, sport: Sport, date: NaiveDate) -> Result<EventList, ApiError> {
        Client::scheduled_events(self, sport, date).await
    }

    fn endpoints(&self) -> &Endpoints {
        Client::endpoints(self)
    }
}
