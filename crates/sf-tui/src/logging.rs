//! File logging for the TUI.
//!
//! The terminal is owned by the UI, so log output goes to
//! `<data-dir>/sf-tui.log`. `RUST_LOG` controls the filter (default `warn`).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "sf-tui.log";

/// Install a subscriber that appends to the log file in `dir`.
///
/// Returns the log file path. Calling this twice in one process keeps the
/// first subscriber.
pub fn init_file_logging(dir: &Path) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(path)
}
