//! Spotgrade host: drives the local-adjustment panel over stdin/stdout.
//!
//! Reads one [`ipc::HostCommand`] JSON object per line and writes the
//! resulting [`ipc::PanelEvent`]s one per line. Logs go to stderr.

mod config;
mod ipc;
mod session;

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use config::HostConfig;
use ipc::{HostCommand, PanelEvent};
use session::HostSession;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize event: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), HostError> {
    let config = HostConfig::default();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .init();

    tracing::info!(
        "spotgrade host ready ({} documents, batch mode {})",
        config.documents,
        config.batch_mode
    );

    let mut session = HostSession::new(&config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let events = match serde_json::from_str::<HostCommand>(&line) {
            Ok(command) => session.handle(command),
            Err(e) => {
                tracing::warn!("Failed to parse command: {e}");
                vec![PanelEvent::Error {
                    message: format!("invalid command: {e}"),
                }]
            }
        };
        for event in &events {
            serde_json::to_writer(&mut stdout, event)?;
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
    }

    tracing::info!("input closed, exiting");
    Ok(())
}
