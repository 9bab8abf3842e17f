//! Tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to a file. The filter
//! comes from `RUST_LOG`, falling back to `toolcat=info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "toolcat=info";

/// `~/.toolcat/toolcat.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".toolcat").join("toolcat.log"))
}

/// Install the global subscriber, appending to `path`.
///
/// Returns false when the file cannot be opened or a subscriber is already
/// set; the app then runs without logs.
pub fn init_tracing(path: Option<PathBuf>) -> bool {
    let Some(path) = path else {
        return false;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}
