mod api;
mod config;
mod export;
mod models;
mod report;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::{FixedAccount, HttpApi};
use crate::config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    setup_logging(&config)?;

    let api = HttpApi::new(
        &config.api_url,
        Box::new(FixedAccount(config.account_id.clone())),
    )
    .with_context(|| format!("Invalid FINTRACK_API_URL: {}", config.api_url))?;
    info!(base_url = %api.base_url(), account = %config.account_id, "starting fintrack");

    match args.len() {
        1 => run::as_tui(&api),
        _ => run::as_cli(&args, &api),
    }
}

/// Log to a file in the data directory; the terminal belongs to the TUI.
fn setup_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
