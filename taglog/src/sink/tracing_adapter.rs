//! Tracing library adapter implementation.

use std::error::Error;

use crate::severity::Severity;
use crate::sink::r#trait::render_error_chain;
use crate::sink::LogSink;

/// Sink that delegates to the `tracing` crate.
///
/// This adapter bridges the [`LogSink`] contract to the `tracing` ecosystem,
/// so the facade's output reaches whatever subscriber the host installed
/// (see [`crate::logging::init_logging`]). `tracing` has no FATAL level;
/// [`Severity::Fatal`] is emitted as an error event.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use taglog::facade::LogFacade;
/// use taglog::sink::TracingSink;
///
/// // Assumes a tracing subscriber is already initialized
/// let log = LogFacade::new(Arc::new(TracingSink::new()));
/// log.info("using the tracing backend");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, tag: &str, message: &str, error: Option<&dyn Error>) {
        let line = match error {
            Some(error) => format!("{} {} | {}", tag, message, render_error_chain(error)),
            None => format!("{} {}", tag, message),
        };
        match severity {
            Severity::Trace => tracing::trace!("{}", line),
            Severity::Debug => tracing::debug!("{}", line),
            Severity::Info => tracing::info!("{}", line),
            Severity::Warn => tracing::warn!("{}", line),
            Severity::Error => tracing::error!("{}", line),
            Severity::Fatal => tracing::error!("FATAL {}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingSink>();
    }

    #[test]
    fn test_tracing_sink_as_trait_object() {
        let sink: Box<dyn LogSink> = Box::new(TracingSink::new());
        // Emits via tracing (may not appear without a subscriber).
        sink.write(Severity::Info, "(Widget:refresh:42)", "test info", None);
        sink.write(Severity::Fatal, "(Widget:refresh:42)", "test fatal", None);
    }

    #[test]
    fn test_tracing_sink_debug_impl() {
        assert_eq!(format!("{:?}", TracingSink), "TracingSink");
    }
}
