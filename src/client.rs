/// HTTP client for the scheduled-events API
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_API_BASE_URL, DEFAULT_APP_BASE_URL, DEFAULT_WEBSITE_BASE_URL};
use crate::error::ApiError;
use crate::types::{EventList, Sport};

/// URL templates for the events API, team logos and event detail pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base_url: String,
    app_base_url: String,
    website_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_APP_BASE_URL, DEFAULT_WEBSITE_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(api_base_url: &str, app_base_url: &str, website_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
            website_base_url: website_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url, &config.app_base_url, &config.website_base_url)
    }

    /// `{api}/sport/{sport}/scheduled-events/{YYYY-MM-DD}`
    pub fn scheduled_events(&self, sport: Sport, date: NaiveDate) -> String {
        format!(
            "{}/sport/{}/scheduled-events/{}",
            self.api_base_url,
            sport.key(),
            date.format("%Y-%m-%d")
        )
    }

    /// `{app}/team/{id}/image`
    pub fn team_logo(&self, team_id: i64) -> String {
        format!("{}/team/{}/image", self.app_base_url, team_id)
    }

    /// `{website}/{sport}/match/{slug}/{customId}`
    pub fn event_detail(&self, sport: Sport, slug: &str, custom_id: &str) -> String {
        format!(
            "{}/{}/match/{}/{}",
            self.website_base_url,
            sport.key(),
            slug,
            custom_id
        )
    }
}

/// Decode a scheduled-events body, tagging failures with the request URL
pub fn parse_event_list(url: &str, body: &str) -> Result<EventList, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Parse {
        url: url.to_string(),
        source,
    })
}

pub struct Client {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl Client {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if config.request_timeout > 0 {
            builder = builder.timeout(Duration::from_secs(u64::from(config.request_timeout)));
        }
        let http = builder.build().context("failed to build http client")?;

        Ok(Self {
            http,
            endpoints: Endpoints::from_config(config),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// One GET per call; no retries
    pub async fn scheduled_events(
        &self,
        sport: Sport,
        date: NaiveDate,
    ) -> Result<EventList, ApiError> {
        let url = self.endpoints.scheduled_events(sport, date);
        debug!("FETCH: GET {}", url);

        let network_error = |status: Option<u16>, reason: String| ApiError::Network {
            url: url.clone(),
            status,
            reason,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| network_error(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_error(Some(status.as_u16()), format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| network_error(Some(status.as_u16()), e.to_string()))?;

        let list = parse_event_list(&url, &body)?;
        info!("FETCH: {} events for {} on {}", list.events.len(), sport, date);
        Ok(list)
    }
}
