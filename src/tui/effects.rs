use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use super::action::Action;
use crate::data_provider::EventsProvider;
use crate::settings::{FilterSettings, SettingsStore};
use crate::types::Sport;

/// Side effects returned by the reducer, executed by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchEvents {
        seq: u64,
        sport: Sport,
        date: NaiveDate,
    },
    PersistSettings(FilterSettings),
    OpenUrl(String),
    Batch(Vec<Effect>),
}

pub type ActionFuture = Pin<Box<dyn Future<Output = Action> + Send>>;

/// Effect handler for data fetching, persistence and link opening
pub struct DataEffects {
    provider: Arc<dyn EventsProvider>,
    store: Arc<dyn SettingsStore>,
}

impl DataEffects {
    pub fn new(provider: Arc<dyn EventsProvider>, store: Arc<dyn SettingsStore>) -> Self {
        Self { provider, store }
    }

    /// Fetch events; resolves to `EventsLoaded` tagged with `seq`
    pub fn fetch_events(&self, seq: u64, sport: Sport, date: NaiveDate) -> ActionFuture {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let result = provider.scheduled_events(sport, date).await;
            if let Err(e) = &result {
                error!("Fetch error (seq={}): {}", seq, e);
            }
            Action::EventsLoaded {
                seq,
                result: result.map(Arc::new).map_err(|e| e.to_string()),
            }
        })
    }

    /// Write settings through; failures become a status-bar error
    pub fn persist_settings(&self, settings: FilterSettings) -> Option<Action> {
        debug!("EFFECT: persisting {:?}", settings);
        match settings.save(self.store.as_ref()) {
            Ok(()) => None,
            Err(e) => {
                error!("Failed to save settings: {}", e);
                Some(Action::SetStatusMessage {
                    message: format!("Failed to save settings: {}", e),
                    is_error: true,
                })
            }
        }
    }

    /// Hand the URL to the system browser without waiting on it
    pub fn open_url(&self, url: &str) -> Option<Action> {
        info!("EFFECT: opening {}", url);
        open::that_detached(url).err().map(|e| open_failed(url, e))
    }
}

fn open_failed(url: &str, err: io::Error) -> Action {
    error!("Failed to open {}: {}", url, err);
    Action::SetStatusMessage {
        message: format!("Failed to open browser: {}", err),
        is_error: true,
    }
}
