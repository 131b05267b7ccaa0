use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::action::Action;
use super::effects::{DataEffects, Effect};
use super::reducer::reduce;
use super::state::AppState;

/// Runtime - owns the state and turns actions into effects
///
/// The Runtime is responsible for:
/// - Dispatching actions through the reducer
/// - Executing side effects (fetches run on spawned tasks)
/// - Feeding effect results back as actions
pub struct Runtime {
    state: AppState,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    data_effects: Arc<DataEffects>,
}

impl Runtime {
    pub fn new(initial_state: AppState, data_effects: Arc<DataEffects>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            state: initial_state,
            action_tx,
            action_rx,
            data_effects,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Dispatch an action to be processed by the reducer
    pub fn dispatch(&mut self, action: Action) {
        trace!("ACTION: Dispatching {:?}", action);

        // Take ownership temporarily using mem::take pattern (no clone!)
        let state = std::mem::take(&mut self.state);
        let (new_state, effect) = reduce(state, action);
        self.state = new_state;

        self.execute_effect(effect);
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::FetchEvents { seq, sport, date } => {
                debug!("EFFECT: fetching {} events for {} (seq={})", sport, date, seq);
                let fetch = self.data_effects.fetch_events(seq, sport, date);
                let action_tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = fetch.await;
                    let _ = action_tx.send(action);
                });
            }
            Effect::PersistSettings(settings) => {
                if let Some(action) = self.data_effects.persist_settings(settings) {
                    let _ = self.action_tx.send(action);
                }
            }
            Effect::OpenUrl(url) => {
                if let Some(action) = self.data_effects.open_url(&url) {
                    let _ = self.action_tx.send(action);
                }
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
        }
    }

    /// Process all pending actions in the queue
    ///
    /// Returns the number of actions processed
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Get a sender for dispatching actions from external sources
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Endpoints;
    use crate::dev::mock_client::MockClient;
    use crate::selector::FilterState;
    use crate::settings::{FilterSettings, MemoryStore, SettingsStore, KEY_SPORT};
    use crate::types::Sport;
    use chrono::NaiveDate;

    fn runtime(client: Arc<MockClient>, store: Arc<MemoryStore>) -> Runtime {
        let filters = FilterState::new(
            FilterSettings {
                sport: Sport::Basketball,
                ..FilterSettings::default()
            },
            NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
        );
        let effects = Arc::new(DataEffects::new(client, store));
        Runtime::new(AppState::new(filters, Endpoints::default()), effects)
    }

    async fn settle(runtime: &mut Runtime) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            runtime.process_actions();
        }
    }

    #[tokio::test]
    async fn test_refresh_round_trip() {
        let client = Arc::new(MockClient::new());
        let mut runtime = runtime(client.clone(), Arc::new(MemoryStore::new()));

        runtime.dispatch(Action::RefreshData);
        assert!(runtime.state().loading);
        settle(&mut runtime).await;

        assert_eq!(client.calls(), 1);
        assert!(!runtime.state().loading);
        assert_eq!(runtime.state().event_count(), 6);
    }

    #[tokio::test]
    async fn test_sport_change_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut runtime = runtime(Arc::new(MockClient::new()), store.clone());

        runtime.dispatch(Action::NextSport);
        let expected = Sport::Basketball.next();
        assert_eq!(store.get(KEY_SPORT).as_deref(), Some(expected.key()));
        settle(&mut runtime).await;
        assert_eq!(runtime.state().filters.settings.sport, expected);
        assert!(runtime.state().view.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_sets_error() {
        let mut runtime = runtime(Arc::new(MockClient::failing()), Arc::new(MemoryStore::new()));
        runtime.dispatch(Action::RefreshData);
        settle(&mut runtime).await;

        assert!(runtime.state().status.is_error);
        assert!(runtime.state().view.is_none());
    }
}
