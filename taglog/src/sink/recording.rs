//! Recording sink implementation.

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::severity::Severity;
use crate::sink::r#trait::render_error_chain;
use crate::sink::LogSink;

/// One line as received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntry {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
    /// Error chain rendered to text, if an error was attached.
    pub error: Option<String>,
}

/// Sink that captures every line for later inspection.
///
/// The write counter is separate from the entry list so "zero sink calls"
/// assertions do not depend on the mutex.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<RecordedEntry>>,
    writes: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes received so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<RecordedEntry> {
        self.entries.lock().ok().and_then(|e| e.last().cloned())
    }

    /// Drop all recorded entries and reset the counter.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
        self.writes.store(0, Ordering::SeqCst);
    }
}

impl LogSink for RecordingSink {
    fn write(&self, severity: Severity, tag: &str, message: &str, error: Option<&dyn Error>) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(RecordedEntry {
                severity,
                tag: tag.to_string(),
                message: message.to_string(),
                error: error.map(render_error_chain),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_entries_in_order() {
        let sink = RecordingSink::new();
        sink.write(Severity::Info, "tag-a", "first", None);
        sink.write(Severity::Warn, "tag-b", "second", None);

        let entries = sink.entries();
        assert_eq!(sink.writes(), 2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].severity, Severity::Warn);
        assert_eq!(sink.last().unwrap().tag, "tag-b");
    }

    #[test]
    fn test_clear_resets_counter_and_entries() {
        let sink = RecordingSink::new();
        sink.write(Severity::Debug, "tag", "line", None);
        sink.clear();
        assert_eq!(sink.writes(), 0);
        assert!(sink.entries().is_empty());
        assert!(sink.last().is_none());
    }
}
