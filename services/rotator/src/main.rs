//! OpenLoop account rotator
//!
//! Single-binary client that:
//! 1. Loads config and opens the token store
//! 2. Collects new bearer tokens interactively
//! 3. Runs the round-robin cycle driver indefinitely

mod config;
mod prompt;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openloop_api::{OpenLoopClient, TokenStore};
use rotator_core::{AccountLogger, CountdownWaiter, Driver, TcpLatencyProbe};

use crate::config::Config;

/// Sequential account rotator for the OpenLoop bandwidth API
#[derive(Parser)]
#[command(name = "openloop-rotator")]
#[command(about = "Rotates bandwidth-share reporting across saved accounts")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics default to warn so the interactive console stays clean;
    // LOG_LEVEL / RUST_LOG turn the libraries up when needed.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    println!(
        "{}",
        "openloop-rotator — sequential bandwidth share client"
            .blue()
            .bold()
    );
    println!();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        token_dir = %config.storage.token_dir.display(),
        "starting up"
    );

    let store = TokenStore::open(&config.storage.token_dir)
        .await
        .context("failed to open token store")?;
    let existing = store.list().await.context("failed to list saved tokens")?;
    println!(
        "{}",
        format!("found {} saved token(s)", existing.len()).green()
    );

    prompt::collect_tokens(std::io::stdin().lock(), &store).await?;

    let tokens = store.list().await.context("failed to list saved tokens")?;
    if tokens.is_empty() {
        println!(
            "{}",
            "no tokens saved — add at least one token before starting".red()
        );
        anyhow::bail!("no tokens available, exiting");
    }

    println!();
    println!(
        "{}",
        format!("running rotation over {} account(s)", tokens.len()).green()
    );
    println!();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let api = OpenLoopClient::with_base_url(http, &config.api.base_url);
    let probe = TcpLatencyProbe::new(&config.api_host());
    let logger = AccountLogger::new(&config.storage.log_dir);

    let mut driver = Driver::new(tokens, api, probe, CountdownWaiter, logger)
        .context("failed to start driver")?;
    driver.run().await;

    Ok(())
}
