//! Panel hook entry point.
//!
//! The panel runs `lxd-connector-hook [--config PATH] <EVENT>` once per event,
//! writes the parameter bundle to stdin and reads the result from stdout.
//! Logs go to stderr.
//!
//! Exit codes: 0 success result, 1 error result, 2 bootstrap failure.

mod cli;
mod dispatch;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lxd_connector_app::{AppConfig, AppState};
use lxd_connector_core::types::PanelParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use dispatch::{EventOutcome, EXIT_BOOTSTRAP_FAILURE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    init_tracing(config.as_ref().map_or("info", |c| c.log_level.as_str()));

    let (state, params) = match bootstrap(config, &cli).await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!("Bootstrap failed: {:#}", e);
            return ExitCode::from(EXIT_BOOTSTRAP_FAILURE);
        }
    };

    let outcome = match run(&state, &cli, params.as_ref()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to render result: {:#}", e);
            return ExitCode::from(EXIT_BOOTSTRAP_FAILURE);
        }
    };

    println!("{}", outcome.body);
    ExitCode::from(outcome.exit_status())
}

/// Tracing to stderr; stdout carries the result document.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

async fn bootstrap(
    config: lxd_connector_core::CoreResult<AppConfig>,
    cli: &Cli,
) -> anyhow::Result<(AppState, Option<PanelParams>)> {
    let config =
        config.with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    let params = if dispatch::needs_params(&cli.event) {
        Some(dispatch::read_params(std::io::stdin())?)
    } else {
        None
    };
    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;
    Ok((state, params))
}

async fn run(
    state: &AppState,
    cli: &Cli,
    params: Option<&PanelParams>,
) -> anyhow::Result<EventOutcome> {
    match params {
        Some(params) => {
            tracing::debug!("Event {:?} for {:?}", cli.event, params);
            dispatch::dispatch(state, &cli.event, params).await
        }
        None => dispatch::metadata(state),
    }
}
