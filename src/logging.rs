//! File logging.
//!
//! The TUI owns stdout, so log output goes to `<data dir>/packdeck/packdeck.log`.
//! The filter comes from `PACKDECK_LOG` (e.g. `packdeck=debug`), defaulting
//! to `info`, or `debug` in dev mode.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{classify_io_error, SystemError};

pub const ENV_LOG: &str = "PACKDECK_LOG";

pub const LOG_FILE_NAME: &str = "packdeck.log";

fn filter(dev_mode: bool) -> EnvFilter {
    let default = if dev_mode { "debug" } else { "info" };
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber writing to `dir`. Returns the log path.
///
/// Calling it twice keeps the first subscriber.
pub fn init(dir: &Path, dev_mode: bool) -> Result<PathBuf, SystemError> {
    fs::create_dir_all(dir)
        .map_err(|e| classify_io_error(e, Some(dir.to_path_buf()), "create log directory"))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| classify_io_error(e, Some(path.clone()), "open log file"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(dev_mode))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "packdeck starting");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested");
        let path = init(&logs, false).unwrap();
        assert_eq!(path, logs.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
