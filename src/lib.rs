pub mod client;
pub mod commands;
pub mod config;
pub mod data_provider;
#[cfg(any(test, feature = "development"))]
pub mod dev;
pub mod error;
pub mod fixtures;
pub mod formatting;
pub mod refresh;
pub mod selector;
pub mod settings;
pub mod tui;
pub mod types;
