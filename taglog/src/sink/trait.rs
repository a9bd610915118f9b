//! LogSink trait definition.

use std::error::Error;

use crate::severity::Severity;

/// Destination for fully formatted log lines.
///
/// The facade calls [`write`](LogSink::write) exactly once per enabled log
/// call. Implementations must not panic and must not filter by severity -
/// gating happens in the facade, before tags are even composed.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; log calls arrive concurrently from
/// arbitrary threads.
pub trait LogSink: Send + Sync {
    /// Write one log line.
    ///
    /// `tag` is the composed origin label, `message` the caller's text, and
    /// `error` an optional error value to render with its source chain.
    fn write(&self, severity: Severity, tag: &str, message: &str, error: Option<&dyn Error>);
}

/// Render an error and its source chain onto one line.
///
/// Shared by sink implementations that print errors as text.
pub(crate) fn render_error_chain(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
