//! Log severity definition.

use std::fmt;

/// Severity of a log line.
///
/// Totally ordered by conventional severity. The facility does not filter by
/// severity - every enabled call reaches the sink - but sinks and subscribers
/// may use the ordering for their own purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Verbose diagnostic output
    Trace,
    /// Debugging information
    Debug,
    /// General information
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
    /// A condition that should never happen
    Fatal,
}

impl Severity {
    /// Uppercase label for rendering, e.g. `INFO`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// All severities in ascending order.
    pub fn all() -> [Severity; 6] {
        [
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
