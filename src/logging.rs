use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MINICAL_LOG";

pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("minical").join("minical.log"))
}

/// Route tracing output to the log file; the terminal belongs to the UI.
///
/// Returns the file written to, or `None` when no log file could be opened
/// (logging is then left disabled).
pub fn init() -> Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return Ok(None);
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return Ok(None);
    };

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| eyre!("invalid {LOG_ENV} / RUST_LOG filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;

    Ok(Some(path))
}
