use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,crewdesk=debug,crewdesk_core=debug,crewdesk_tui=debug";

/// Send tracing output to a log file; the terminal belongs to the UI.
///
/// `CREWDESK_LOG` takes precedence over `RUST_LOG`.
pub fn init_tracing() -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .or_else(dirs::config_dir)
        .ok_or_else(|| anyhow!("Could not determine data directory"))?
        .join("crewdesk");
    fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("crewdesk.log");
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let filter = std::env::var("CREWDESK_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(log_path)
}
