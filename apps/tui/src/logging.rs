//! Tracing setup. The interactive dashboard owns the terminal, so its logs go
//! to a file; headless runs log to stderr.

use crate::error::{AnalyticsError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "indoor-analytics.log";

fn env_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Logs to `<log_dir>/indoor-analytics.log`. Keep the guard alive until exit
/// or buffered lines are lost.
pub fn init_file(log_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    if !log_dir.is_dir() {
        return Err(AnalyticsError::InvalidPath(log_dir.to_path_buf()));
    }

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}

pub fn init_stderr(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let guard = init_file(&log_dir, false).unwrap();
        assert!(log_dir.is_dir());
        drop(guard);
    }

    #[test]
    fn a_file_in_place_of_the_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();
        assert!(init_file(&blocker, false).is_err());
    }
}
