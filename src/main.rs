use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use sidescore::client::Client;
use sidescore::commands::{self, ScoreOptions};
use sidescore::config;
use sidescore::data_provider::EventsProvider;
use sidescore::settings::{FileStore, MemoryStore, SettingsStore};
use sidescore::types::Sport;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "sidescore")]
#[command(
    about = "Live sports scores in the terminal",
    long_about = "Live sports scores in the terminal\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Use fixture data instead of the live API
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct ScoreArgs {
    /// Sport key (see `sidescore sports`); defaults to the saved sport
    #[arg(short, long)]
    sport: Option<String>,

    /// Date in YYYY-MM-DD format (optional, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Hide finished events for this run
    #[arg(long)]
    hide_finished: bool,

    /// Hide events that have not started for this run
    #[arg(long)]
    hide_not_started: bool,

    /// Show full team names for this run
    #[arg(long)]
    long_names: bool,

    /// Print each event's detail page link
    #[arg(long)]
    links: bool,
}

impl From<ScoreArgs> for ScoreOptions {
    fn from(args: ScoreArgs) -> Self {
        ScoreOptions {
            sport: args.sport,
            date: args.date,
            hide_finished: args.hide_finished,
            hide_not_started: args.hide_not_started,
            long_names: args.long_names,
            links: args.links,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display scores for one sport and date
    Scores(ScoreArgs),
    /// Redisplay scores every refresh interval
    Watch(ScoreArgs),
    /// Show or change saved filter settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommand>,
    },
    /// List supported sports
    Sports,
    /// Display current configuration
    Config,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print saved settings
    Show,
    /// Save a setting (selectedSport, hideFinished, hideNotStarted, longnames)
    Set { key: String, value: String },
    /// Forget all saved settings
    Reset,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("refresh_interval: {} seconds", cfg.refresh_interval);
    println!("request_timeout: {} seconds{}", cfg.request_timeout, if cfg.request_timeout == 0 { " (none)" } else { "" });
    println!("api_base_url: {}", cfg.api_base_url);
    println!("app_base_url: {}", cfg.app_base_url);
    println!("website_base_url: {}", cfg.website_base_url);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("heading_fg: {:?}", cfg.theme.heading_fg);
}

fn handle_sports_command() {
    for sport in Sport::ALL {
        println!("{:<18} {}", sport.key(), sport.display_name());
    }
}

/// Settings persist under the XDG data home; fall back to memory when unavailable
fn open_settings_store() -> (Arc<dyn SettingsStore>, Option<String>) {
    match FileStore::open_default() {
        Ok(store) => {
            let location = store.path().display().to_string();
            (Arc::new(store), Some(location))
        }
        Err(e) => {
            tracing::warn!("Settings will not persist: {}", e);
            eprintln!("Warning: settings will not persist ({})", e);
            (Arc::new(MemoryStore::new()), None)
        }
    }
}

fn create_provider(cli: &Cli, config: &config::Config) -> anyhow::Result<Arc<dyn EventsProvider>> {
    #[cfg(feature = "development")]
    if cli.mock {
        return Ok(Arc::new(sidescore::dev::mock_client::MockClient::new()));
    }
    #[cfg(not(feature = "development"))]
    let _ = cli;

    Ok(Arc::new(Client::new(config)?))
}

fn handle_settings_command(store: &dyn SettingsStore, location: Option<&str>, action: Option<SettingsCommand>) -> anyhow::Result<()> {
    match action.unwrap_or(SettingsCommand::Show) {
        SettingsCommand::Show => {
            commands::settings::show(store, location);
            Ok(())
        }
        SettingsCommand::Set { key, value } => commands::settings::set(store, &key, &value),
        SettingsCommand::Reset => commands::settings::reset(store),
    }
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(cli: &Cli, command: Commands, config: config::Config) -> anyhow::Result<()> {
    match command {
        Commands::Config => {
            handle_config_command();
            Ok(())
        }
        Commands::Sports => {
            handle_sports_command();
            Ok(())
        }
        Commands::Settings { action } => {
            let (store, location) = open_settings_store();
            handle_settings_command(store.as_ref(), location.as_deref(), action)
        }
        Commands::Scores(args) => {
            let provider = create_provider(cli, &config)?;
            let (store, _) = open_settings_store();
            commands::scores::run(provider.as_ref(), store.as_ref(), &args.into()).await
        }
        Commands::Watch(args) => {
            let provider = create_provider(cli, &config)?;
            let (store, _) = open_settings_store();
            commands::watch::run(provider, store.as_ref(), &args.into(), config.refresh_period()).await
        }
    }
}

/// Run TUI mode
async fn run_tui_mode(cli: &Cli, config: config::Config) -> anyhow::Result<()> {
    let provider = create_provider(cli, &config)?;
    let (store, _) = open_settings_store();
    sidescore::tui::run(provider, store, config).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let mut cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run TUI
    let Some(command) = cli.command.take() else {
        if let Err(e) = run_tui_mode(&cli, config).await {
            eprintln!("Error running TUI: {:#}", e);
            std::process::exit(1);
        }
        return;
    };

    if let Err(e) = execute_command(&cli, command, config).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["sidescore"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_sports_runs_without_client_or_settings() {
        let mut cli = Cli::try_parse_from(["sidescore", "sports"]).unwrap();
        let command = cli.command.take().unwrap();
        assert!(matches!(command, Commands::Sports));
        assert!(execute_command(&cli, command, config::Config::default()).await.is_ok());
    }
}
