//! No-operation sink implementation.

use std::error::Error;

use crate::severity::Severity;
use crate::sink::LogSink;

/// A sink that discards all lines.
///
/// Useful for benchmarks and for embedding the facade where output is
/// unwanted but callers still exercise the logging paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl LogSink for NoOpSink {
    #[inline]
    fn write(&self, _severity: Severity, _tag: &str, _message: &str, _error: Option<&dyn Error>) {
        // Intentionally empty - discard all log lines
    }
}
