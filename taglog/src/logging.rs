//! Backend bootstrap for the default tracing sink.
//!
//! The facade's [`crate::sink::TracingSink`] emits through the `tracing`
//! crate; this module wires up a subscriber with dual output:
//! - Writes to `logs/taglog.log` (cleared on session start)
//! - Also prints to stdout for terminal tailing
//!
//! The env filter defaults to `trace` because the facade does its own gating
//! (the enabled flag); the backend must not silently drop severities. Hosts
//! that embed their own subscriber can skip this module entirely.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the tracing backend.
///
/// Creates the log directory if needed, clears the previous log file, and
/// sets up dual output to both file and stdout.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files (e.g., "logs")
/// * `log_file` - Log filename (e.g., "taglog.log")
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared. Panics if a global subscriber is already installed -
/// call this at most once per process.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    // Clear the previous log file; handles both existing and missing files.
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    // The facade already formats tags; keep the backend layers bare.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get default log directory path.
pub fn default_log_dir() -> &'static str {
    "logs"
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    "taglog.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "taglog.log");
    }

    #[test]
    fn test_creates_directory_and_clears_file() {
        // Can't call init_logging here because of the global subscriber,
        // but the file operations it performs are testable on their own.
        let dir = tempfile::tempdir().expect("temp dir");
        let log_dir = dir.path().join("nested").join("logs");
        fs::create_dir_all(&log_dir).expect("create log dir");

        let log_path = log_dir.join("test.log");
        fs::write(&log_path, "old session data").expect("write old data");
        fs::write(&log_path, "").expect("clear log file");

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    // Note: actual log output requires integration tests because tracing
    // uses a global subscriber that can only be set once per process.
}
