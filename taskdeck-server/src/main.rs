//! # taskdeck server
//!
//! Serves the in-memory task list consumed by the `taskdeck` carousel client.
//! Configuration comes from `taskdeck.toml` (or `TASKDECK_CONFIG`), `.env`
//! and `TASKDECK_*` variables; `--host`/`--port` override the result.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use taskdeck_config::{ConfigLoad, ConfigLoader};
use taskdeck_server::{AppState, create_app, infra::startup::init_tracing};
use tracing::{info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "taskdeck-server")]
#[command(about = "In-memory task server backing the taskdeck carousel")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TASKDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path.clone());
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    let addr = config.server.bind_address();
    let state = AppState::new(Arc::new(config));
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting taskdeck server (HTTP) on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("taskdeck server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; shutting down");
    }
}
