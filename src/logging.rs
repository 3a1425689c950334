//! File logging for the binary.
//!
//! The terminal belongs to the UI, so log lines go to
//! `~/.chitchat/chitchat.log`. The filter comes from `CHITCHAT_LOG`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::auth::CREDENTIALS_DIR;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "CHITCHAT_LOG";
pub const DEFAULT_FILTER: &str = "chitchat=info";
const LOG_FILE: &str = "chitchat.log";

/// `~/.chitchat/chitchat.log`, or `None` without a home directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CREDENTIALS_DIR).join(LOG_FILE))
}

/// Filter from `CHITCHAT_LOG`, falling back to [`DEFAULT_FILTER`] when it is
/// unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path` (appending).
pub fn init_logging(path: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {}", e))?;
    Ok(())
}
