//! Logging for multitool
//!
//! The menu owns stdout, so tracing output goes to a file. Nothing is logged
//! when no log file can be opened.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Explicit log file override
pub const LOG_FILE_ENV: &str = "MULTITOOL_LOG_FILE";

/// Filter directives, e.g. `debug` or `multitool=trace`
pub const LOG_FILTER_ENV: &str = "MULTITOOL_LOG";

const DEFAULT_FILTER: &str = "info";

/// Discover log file path with fallback chain
///
/// Priority:
/// 1. $MULTITOOL_LOG_FILE (explicit override)
/// 2. $XDG_STATE_HOME/multitool/multitool.log
/// 3. ~/.local/state/multitool/multitool.log
pub fn discover_log_path() -> Option<PathBuf> {
    log_path_from(|name| std::env::var(name).ok())
}

fn log_path_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

    if let Some(path) = lookup(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Some(state) = lookup("XDG_STATE_HOME") {
        return Some(PathBuf::from(state).join("multitool").join("multitool.log"));
    }

    lookup("HOME").map(|home| {
        PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("multitool")
            .join("multitool.log")
    })
}

/// Install the global subscriber. Returns the log file in use, if any.
pub fn init() -> Option<PathBuf> {
    let path = discover_log_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
