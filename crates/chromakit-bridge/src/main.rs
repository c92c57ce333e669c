//! Chromakit Bridge — JSON-lines host for the color engine.
//!
//! Reads one `UiToEngine` message per line on stdin and writes one
//! `EngineToUi` message per line on stdout. Logs go to stderr, filtered by
//! `CHROMAKIT_LOG` (default `info`).

mod config;
mod error;
mod image_loader;
mod ipc;
mod session;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::session::Session;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Bridge stopped: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CHROMAKIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), BridgeError> {
    let config = BridgeConfig::default();
    tracing::info!(
        "Chromakit bridge ready (palette {}, history {}, max samples {})",
        config.palette_size,
        config.history_limit,
        config.max_samples
    );
    let mut session = Session::new(config)?;
    tracing::debug!("Initial palette: {:?}", session.palette().colors());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = session.handle_line(&line);
        match serde_json::to_string(&response) {
            Ok(json) => {
                writeln!(stdout, "{json}")?;
                stdout.flush()?;
            }
            Err(e) => tracing::error!("Failed to serialize EngineToUi: {e}"),
        }
    }
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
