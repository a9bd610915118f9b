//! Automatic lifecycle-event logging.
//!
//! Hosts that manage component lifecycles (window systems, service managers)
//! can expose a [`LifecycleSource`]; attaching a [`LifecycleAutoLogger`] to
//! such a source emits one INFO line per event through the facade, in
//! extended mode with the event subject's type as context. The auto-logger
//! is an optional add-on - nothing else in the crate depends on it.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::facade::LogFacade;
use crate::severity::Severity;

const HALF_LINE: &str = "---------------------";

/// The fixed set of lifecycle callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    SaveState,
    Destroyed,
}

impl LifecycleEvent {
    /// Lowercase label for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Created => "created",
            LifecycleEvent::Started => "started",
            LifecycleEvent::Resumed => "resumed",
            LifecycleEvent::Paused => "paused",
            LifecycleEvent::Stopped => "stopped",
            LifecycleEvent::SaveState => "save-state",
            LifecycleEvent::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of lifecycle events.
pub trait LifecycleObserver: Send + Sync {
    /// Called once per event; `subject_type` is the type name of the object
    /// the event concerns.
    fn on_lifecycle_event(&self, subject_type: &str, event: LifecycleEvent);
}

/// Host boundary: something that dispatches lifecycle events to observers.
///
/// Implementations must ignore a [`register`](LifecycleSource::register) of
/// an observer that is already registered (`Arc::ptr_eq`), so that attaching
/// an auto-logger twice never duplicates log lines.
pub trait LifecycleSource {
    fn register(&self, observer: Arc<dyn LifecycleObserver>);
    fn unregister(&self, observer: &Arc<dyn LifecycleObserver>);
}

/// Observer that forwards every event to the facade.
struct EventLogger {
    log: Arc<LogFacade>,
    message: String,
}

impl LifecycleObserver for EventLogger {
    fn on_lifecycle_event(&self, subject_type: &str, event: LifecycleEvent) {
        let line = format!("{} {}", self.message, event);
        self.log
            .write(Severity::Info, Some(subject_type), &line, None);
    }
}

/// Add-on that logs one line per lifecycle event.
///
/// Attach is idempotent: the same observer instance is reused across
/// attaches, so a source that deduplicates observers (as the trait contract
/// requires) emits each event once no matter how often `attach` ran.
pub struct LifecycleAutoLogger {
    log: Arc<LogFacade>,
    message: String,
    observer: Mutex<Option<Arc<dyn LifecycleObserver>>>,
}

impl LifecycleAutoLogger {
    /// Create an auto-logger with the default common message.
    pub fn new(log: Arc<LogFacade>) -> Self {
        Self::with_message(log, format!("{} Lifecycle {}", HALF_LINE, HALF_LINE))
    }

    /// Create an auto-logger with a custom common message.
    pub fn with_message(log: Arc<LogFacade>, message: impl Into<String>) -> Self {
        Self {
            log,
            message: message.into(),
            observer: Mutex::new(None),
        }
    }

    /// Register this auto-logger's observer with a source.
    ///
    /// Warns (through the facade itself) and registers nothing while the
    /// facade is disabled.
    pub fn attach(&self, source: &dyn LifecycleSource) {
        if !self.log.enabled() {
            self.log
                .warn("Can't attach the lifecycle auto logger, logging is disabled");
            return;
        }
        let observer = self.shared_observer();
        source.register(observer);
    }

    /// Unregister this auto-logger's observer from a source.
    ///
    /// A no-op when nothing was ever attached.
    pub fn detach(&self, source: &dyn LifecycleSource) {
        let observer = match self.observer.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        if let Some(observer) = observer {
            source.unregister(&observer);
        }
    }

    fn shared_observer(&self) -> Arc<dyn LifecycleObserver> {
        let mut guard = match self.observer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard
            .get_or_insert_with(|| {
                Arc::new(EventLogger {
                    log: Arc::clone(&self.log),
                    message: self.message.clone(),
                })
            })
            .clone()
    }
}
