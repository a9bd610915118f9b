//! The public severity-keyed logging facade.
//!
//! [`LogFacade`] owns the process-wide logging state (enabled flag, stamp,
//! style, running maximum tag width) and drives one log call end to end:
//! check the enabled flag, capture and walk the stack, compose the tag, and
//! hand exactly one line to the sink. None of its operations can fail from
//! the caller's perspective; attribution and formatting failures degrade to
//! sentinels and placeholders instead of propagating.
//!
//! State fields are independent atomics (the stamp and sink sit behind an
//! `RwLock` because they are not atomically sized). There is no cross-field
//! transaction and no lock on the hot path: configuration is read-mostly, and
//! the running width uses `fetch_max`, so a racing writer can only lose to a
//! larger value. The worst concurrent outcome is one call padded narrower
//! than its neighbor, never a torn tag.

use std::any::type_name_of_val;
use std::error::Error;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use crate::callstack;
use crate::fault::Fault;
use crate::severity::Severity;
use crate::sink::{LogSink, TracingSink};
use crate::tag::{self, TagRequest, TagStyle, DEFAULT_MAX_TAG_WIDTH};

static GLOBAL: OnceLock<Arc<LogFacade>> = OnceLock::new();

/// The process-wide facade, created on first use over a [`TracingSink`].
pub fn global() -> &'static Arc<LogFacade> {
    GLOBAL.get_or_init(|| Arc::new(LogFacade::new(Arc::new(TracingSink::new()))))
}

/// Call-site attributing logger with style-configurable tags.
///
/// See the crate-level docs for the quick tour. All methods are safe to call
/// concurrently from any thread; every call runs synchronously on the calling
/// thread and acquires nothing that outlives it.
pub struct LogFacade {
    enabled: AtomicBool,
    style: AtomicU8,
    max_tag_width: AtomicUsize,
    degraded: AtomicU64,
    stamp: RwLock<Option<String>>,
    sink: RwLock<Arc<dyn LogSink>>,
}

/// Generates the five entry-point shapes for one severity.
macro_rules! severity_api {
    (
        $severity:expr,
        $name:ident, $name_err:ident, $name_cause:ident, $name_with:ident, $name_with_err:ident
    ) => {
        #[doc = concat!("Log a message at ", stringify!($name), " severity.")]
        pub fn $name(&self, message: &str) {
            self.write($severity, None, message, None);
        }

        #[doc = concat!("Log a message and an error at ", stringify!($name), " severity.")]
        pub fn $name_err(&self, message: &str, error: &dyn Error) {
            self.write($severity, None, message, Some(error));
        }

        #[doc = concat!("Log an error alone at ", stringify!($name), " severity.")]
        pub fn $name_cause(&self, error: &dyn Error) {
            self.write($severity, None, "", Some(error));
        }

        #[doc = concat!(
            "Log a message at ", stringify!($name), " severity in extended mode.\n\n",
            "`context` is typically `self`; its type name joins the tag so the\n",
            "reader sees both the calling instance's type and the call site."
        )]
        pub fn $name_with<T: ?Sized>(&self, context: &T, message: &str) {
            self.write($severity, Some(type_name_of_val(context)), message, None);
        }

        #[doc = concat!(
            "Log a message and an error at ", stringify!($name),
            " severity in extended mode."
        )]
        pub fn $name_with_err<T: ?Sized>(&self, context: &T, message: &str, error: &dyn Error) {
            self.write($severity, Some(type_name_of_val(context)), message, Some(error));
        }
    };
}

impl LogFacade {
    /// Create a facade over the given sink with default state:
    /// enabled, no stamp, [`TagStyle::Aligned`], running width 40.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            style: AtomicU8::new(TagStyle::Aligned.as_u8()),
            max_tag_width: AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH),
            degraded: AtomicU64::new(0),
            stamp: RwLock::new(None),
            sink: RwLock::new(sink),
        }
    }

    // --- configuration surface ---

    /// Enable or disable logging.
    ///
    /// While disabled every entry point returns immediately, before any
    /// stack capture or formatting work.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether logging is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Set the stamp prefixed to every tag (a build id or similar).
    pub fn set_stamp(&self, stamp: impl Into<String>) {
        if let Ok(mut guard) = self.stamp.write() {
            *guard = Some(stamp.into());
        }
    }

    /// Remove the stamp.
    pub fn clear_stamp(&self) {
        if let Ok(mut guard) = self.stamp.write() {
            *guard = None;
        }
    }

    /// Switch the tag style.
    ///
    /// Switching resets the running maximum tag width to its default; this
    /// is the only way the width ever shrinks.
    pub fn set_style(&self, style: TagStyle) {
        self.style.store(style.as_u8(), Ordering::Relaxed);
        self.max_tag_width
            .store(DEFAULT_MAX_TAG_WIDTH, Ordering::Relaxed);
    }

    /// The current tag style.
    pub fn style(&self) -> TagStyle {
        TagStyle::from_u8(self.style.load(Ordering::Relaxed))
    }

    /// Replace the sink. Used to inject counting/recording sinks in tests.
    pub fn set_sink(&self, sink: Arc<dyn LogSink>) {
        if let Ok(mut guard) = self.sink.write() {
            *guard = sink;
        }
    }

    /// How many times tag composition panicked and fell back to the
    /// placeholder tag. Diagnostic only.
    pub fn formatter_degraded(&self) -> u64 {
        self.degraded.load(Ordering::Relaxed)
    }

    // --- severity-keyed entry points ---

    severity_api!(Severity::Trace, trace, trace_err, trace_cause, trace_with, trace_with_err);
    severity_api!(Severity::Debug, debug, debug_err, debug_cause, debug_with, debug_with_err);
    severity_api!(Severity::Info, info, info_err, info_cause, info_with, info_with_err);
    severity_api!(Severity::Warn, warn, warn_err, warn_cause, warn_with, warn_with_err);
    severity_api!(Severity::Error, error, error_err, error_cause, error_with, error_with_err);
    severity_api!(Severity::Fatal, fatal, fatal_err, fatal_cause, fatal_with, fatal_with_err);

    /// Log a message at an arbitrary severity.
    pub fn log(&self, severity: Severity, message: &str) {
        self.write(severity, None, message, None);
    }

    /// Log a message and an error at an arbitrary severity.
    pub fn log_err(&self, severity: Severity, message: &str, error: &dyn Error) {
        self.write(severity, None, message, Some(error));
    }

    /// Log an error alone at an arbitrary severity.
    pub fn log_cause(&self, severity: Severity, error: &dyn Error) {
        self.write(severity, None, "", Some(error));
    }

    // --- special entry points ---

    /// Log a recoverable fault at ERROR severity, or hand an unrecoverable
    /// one straight back.
    ///
    /// Unrecoverable faults (see [`Fault::is_unrecoverable`]) are returned
    /// unlogged, even while the facade is disabled - a programming error must
    /// never be swallowed here. Callers forward it with `?`.
    pub fn log_or_propagate<E: Fault>(&self, message: &str, error: E) -> Result<(), E> {
        if error.is_unrecoverable() {
            return Err(error);
        }
        self.write(Severity::Error, None, message, Some(&error));
        Ok(())
    }

    /// [`log_or_propagate`](Self::log_or_propagate) without a message.
    pub fn log_or_propagate_cause<E: Fault>(&self, error: E) -> Result<(), E> {
        self.log_or_propagate("", error)
    }

    /// Log the current thread's name and id at TRACE severity.
    ///
    /// Uses the thread-metadata tag instead of call-site attribution.
    pub fn thread_info(&self, message: &str) {
        if !self.enabled() {
            return;
        }
        let tag = self.compose_thread_tag();
        self.dispatch(Severity::Trace, &tag, message, None);
    }

    /// Log the current thread's name and id together with an error, at
    /// ERROR severity.
    pub fn thread_info_err(&self, message: &str, error: &dyn Error) {
        if !self.enabled() {
            return;
        }
        let tag = self.compose_thread_tag();
        self.dispatch(Severity::Error, &tag, message, Some(error));
    }

    /// Log the external portion of the current call stack at INFO severity,
    /// one frame per line.
    pub fn stack_trace(&self, message: &str) {
        if !self.enabled() {
            return;
        }
        let frames = callstack::capture();
        let mut body = String::from(message);
        if let Some(start) = callstack::find_external_index(&frames, crate::FACILITY_PREFIX) {
            for frame in &frames[start..] {
                let _ = write!(body, "\n  at {}:{}", frame.symbol, frame.line);
            }
        }
        let tag = self.compose_tag(None, &frames);
        self.dispatch(Severity::Info, &tag, &body, None);
    }

    // --- internals ---

    /// The single internal entry point behind every public wrapper.
    ///
    /// The enabled check comes first: stack capture is comparatively
    /// expensive and must not run when logging is off.
    pub(crate) fn write(
        &self,
        severity: Severity,
        context: Option<&str>,
        message: &str,
        error: Option<&dyn Error>,
    ) {
        if !self.enabled() {
            return;
        }
        let frames = callstack::capture();
        let tag = self.compose_tag(context, &frames);
        self.dispatch(severity, &tag, message, error);
    }

    fn compose_tag(&self, context: Option<&str>, frames: &[callstack::StackFrame]) -> String {
        let site = callstack::call_site(frames, crate::FACILITY_PREFIX);
        let stamp = match self.stamp.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        tag::compose(
            &TagRequest {
                stamp: stamp.as_deref(),
                style: self.style(),
                context,
                site: &site,
            },
            &self.max_tag_width,
            &self.degraded,
        )
    }

    fn compose_thread_tag(&self) -> String {
        let stamp = match self.stamp.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        tag::thread_tag(
            stamp.as_deref(),
            self.style(),
            &self.max_tag_width,
            &self.degraded,
        )
    }

    fn dispatch(&self, severity: Severity, tag: &str, message: &str, error: Option<&dyn Error>) {
        let sink = match self.sink.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(_) => return,
        };
        sink.write(severity, tag, message, error);
    }
}
