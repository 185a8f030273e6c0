//! Tracing setup.
//!
//! One-shot commands log to stderr. The TUI owns the terminal, so its
//! traces go to a file resolved through the XDG fallback chain:
//!
//! 1. $COMPASSCTL_LOG_FILE (explicit override)
//! 2. $XDG_STATE_HOME/compass/compassctl.log
//! 3. ~/.local/state/compass/compassctl.log

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Env filter variable, e.g. COMPASS_LOG=compassctl=debug.
const LOG_ENV: &str = "COMPASS_LOG";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Stderr logging for one-shot commands. Quiet by default.
pub fn init_for_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}

/// File logging for the TUI. Falls back to no logging when no writable
/// location exists; the TUI must never lose the terminal to log output.
pub fn init_for_tui() {
    let Some(path) = discover_log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

fn discover_log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("COMPASSCTL_LOG_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("compass").join("compassctl.log"));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("compass")
                .join("compassctl.log"),
        );
    }

    None
}
