//! File logging. The terminal belongs to the UI, so events go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "photocast.log";

/// `<cache dir>/photocast/photocast.log`, or the working directory when the
/// platform has no cache dir.
pub fn default_log_path() -> PathBuf {
    match dirs_next::cache_dir() {
        Some(dir) => dir.join("photocast").join(LOG_FILE_NAME),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}

/// Install the global subscriber, appending to `path` (or the default).
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(path: Option<PathBuf>) -> io::Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("logging init failed: {e}")))?;

    Ok(path)
}
