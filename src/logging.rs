//! Logging setup.
//!
//! The terminal belongs to the UI, so logs only go to a file, and only when
//! one is requested. Verbosity follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `path`. Without a path, nothing
/// is installed and all events are discarded.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init();
    if installed.is_err() {
        // A subscriber is already in place (tests); keep it.
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
