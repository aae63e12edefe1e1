//! File-based logging via tracing. The terminal belongs to the TUI, so log
//! lines go to a file instead of stdout/stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "pokedex-arena";
const LOG_FILE: &str = "pokedex-arena.log";

/// Default log location under the user's cache directory.
pub fn default_log_path() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LOG_FILE)
}

/// Install the global subscriber. Returns `false` when the log file cannot be
/// opened; the app then runs without logging.
pub fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}
