use std::future::Future;
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error};

use crate::commands::scores::{build_view, format_scores};
use crate::commands::ScoreOptions;
use crate::data_provider::EventsProvider;
use crate::error::ApiError;
use crate::formatting::ScoreView;
use crate::refresh::{spawn_ticker, DisplaySlot};
use crate::selector::FilterState;
use crate::settings::SettingsStore;
use crate::types::EventList;

/// Buffer size for timer tick channel
const TICK_CHANNEL_BUFFER_SIZE: usize = 10;

type FetchResult = (u64, Result<EventList, ApiError>);

fn spawn_fetch(
    provider: &Arc<dyn EventsProvider>,
    filters: &FilterState,
    seq: u64,
    result_tx: &mpsc::UnboundedSender<FetchResult>,
) {
    let provider = Arc::clone(provider);
    let result_tx = result_tx.clone();
    let (sport, date) = (filters.settings.sport, filters.date);
    tokio::spawn(async move {
        let result = provider.scheduled_events(sport, date).await;
        let _ = result_tx.send((seq, result));
    });
}

/// Fetch, select and present every `period` until `shutdown` resolves.
///
/// Each tick starts a new fetch without waiting for earlier ones; only the
/// response to the most recent fetch is shown. Failed fetches are logged and
/// leave the previous output in place.
pub async fn watch_loop<F, S>(
    provider: Arc<dyn EventsProvider>,
    filters: FilterState,
    period: Duration,
    mut on_update: F,
    shutdown: S,
) where
    F: FnMut(&ScoreView),
    S: Future<Output = ()>,
{
    let (tick_tx, mut tick_rx) = mpsc::channel::<()>(TICK_CHANNEL_BUFFER_SIZE);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut slot: DisplaySlot<EventList> = DisplaySlot::new();

    let ticker = spawn_ticker(period, move || {
        !matches!(tick_tx.try_send(()), Err(TrySendError::Closed(_)))
    });

    spawn_fetch(&provider, &filters, slot.issue(), &result_tx);

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(()) = tick_rx.recv() => {
                let seq = slot.issue();
                debug!("WATCH: timer refresh seq={}", seq);
                spawn_fetch(&provider, &filters, seq, &result_tx);
            }
            Some((seq, result)) = result_rx.recv() => match result {
                Ok(list) => {
                    if slot.apply(seq, list) {
                        if let Some(list) = slot.current() {
                            on_update(&build_view(list, &filters, provider.as_ref()));
                        }
                    }
                }
                Err(e) => error!("Fetch error: {}", e),
            },
        }
    }

    ticker.abort();
}

fn redraw(view: &ScoreView, filters: &FilterState, links: bool) {
    let mut stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    if styled {
        let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
    }
    print!("{}", format_scores(view, filters, styled, links));
    println!("\nUpdated {}  (Ctrl-C to quit)", Local::now().format("%H:%M:%S"));
    let _ = stdout.flush();
}

pub async fn run(
    provider: Arc<dyn EventsProvider>,
    store: &dyn SettingsStore,
    options: &ScoreOptions,
    period: Duration,
) -> Result<()> {
    let filters = options.resolve(store)?;
    let links = options.links;
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    watch_loop(
        provider,
        filters,
        period,
        |view| redraw(view, &filters, links),
        shutdown,
    )
    .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::settings::FilterSettings;
    use chrono::NaiveDate;

    fn filters() -> FilterState {
        FilterState::new(
            FilterSettings::default(),
            NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_refreshes_on_interval() {
        let client = Arc::new(MockClient::new());
        let provider: Arc<dyn EventsProvider> = client.clone();
        let mut updates = Vec::new();

        watch_loop(
            provider,
            filters(),
            Duration::from_secs(60),
            |view| updates.push(view.event_count()),
            tokio::time::sleep(Duration::from_secs(130)),
        )
        .await;

        assert_eq!(client.calls(), 3);
        assert_eq!(updates, vec![6, 6, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_swallows_fetch_errors() {
        let client = Arc::new(MockClient::failing());
        let provider: Arc<dyn EventsProvider> = client.clone();
        let mut updates = 0;

        watch_loop(
            provider,
            filters(),
            Duration::from_secs(60),
            |_| updates += 1,
            tokio::time::sleep(Duration::from_secs(90)),
        )
        .await;

        assert_eq!(client.calls(), 2);
        assert_eq!(updates, 0);
    }
}
