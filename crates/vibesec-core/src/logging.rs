//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! `RUST_LOG` always wins. Without it, the filter comes from the CLI
//! verbosity count (see [`default_directive`]).

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset.
///
/// 0 = warnings only, 1 = info plus per-URL debug events from our crates,
/// 2 or more = debug everywhere.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,vibesec=debug,vibesec_core=debug",
        _ => "debug",
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// `~/.local/state/vibesec/vibesec.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vibesec")?;
    Ok(xdg_dirs.get_state_home().join("vibesec").join("vibesec.log"))
}

/// Initialize structured logging to [`log_file_path`].
/// Returns Err when the state dir or file is unusable; nothing is installed then.
pub fn init_logging(verbose: u8) -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    // Events are serialized through the mutex; the file is opened in append mode.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("vibesec logging initialized at {}", path.display());
    Ok(path)
}

/// Stderr-only logging, for when [`init_logging`] cannot open its file.
pub fn init_logging_stderr(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
