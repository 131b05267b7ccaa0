pub mod action;
pub mod effects;
pub mod keys;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod view;


pub use action::Action;
pub use effects::{DataEffects, Effect};
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::AppState;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::config::Config;
use crate::data_provider::EventsProvider;
use crate::refresh::spawn_ticker;
use crate::selector::FilterState;
use crate::settings::{FilterSettings, SettingsStore};

/// Keyboard poll timeout; also bounds how long fetched data waits to be drawn
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main entry point for TUI mode
pub async fn run(
    provider: Arc<dyn EventsProvider>,
    store: Arc<dyn SettingsStore>,
    config: Config,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let filters = FilterState::today(FilterSettings::load(store.as_ref()));
    let initial_state = AppState::new(filters, provider.endpoints().clone());
    let data_effects = Arc::new(DataEffects::new(provider, store));
    let mut runtime = Runtime::new(initial_state, data_effects);

    // Trigger initial data load
    runtime.dispatch(Action::RefreshData);

    // Periodic refresh, independent of whether earlier fetches completed
    let tick_tx = runtime.action_sender();
    let ticker = spawn_ticker(config.refresh_period(), move || {
        debug!("TIMER: refresh tick");
        tick_tx.send(Action::RefreshData).is_ok()
    });

    let result = event_loop(&mut terminal, &mut runtime, &config);

    ticker.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime,
    config: &Config,
) -> Result<(), io::Error> {
    loop {
        // Process any actions from effects FIRST (so data loads trigger re-render)
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            debug!("LOOP: Processed {} actions", actions_processed);
        }

        terminal.draw(|f| view::render(f, runtime.state(), &config.theme))?;

        if actions_processed > 0 {
            continue;
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_to_action(key) {
                    if matches!(action, Action::Quit) {
                        debug!("ACTION: Quitting application");
                        return Ok(());
                    }
                    runtime.dispatch(action);
                }
            }
        }
    }
}
