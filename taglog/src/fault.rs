//! Fault classification for the log-or-propagate entry point.
//!
//! Rust has no unchecked-exception category, so errors declare themselves:
//! a fault is *unrecoverable* when it represents a programming error rather
//! than an expected failure. [`crate::facade::LogFacade::log_or_propagate`]
//! refuses to swallow unrecoverable faults - they are handed straight back to
//! the caller, because suppressing a bug is worse than a crash.

use std::error::Error;

/// An error that knows whether it is safe to log-and-continue.
pub trait Fault: Error {
    /// Whether this fault is a programming error that must propagate.
    ///
    /// Defaults to `false`: ordinary, expected failures are logged and
    /// swallowed.
    fn is_unrecoverable(&self) -> bool {
        false
    }
}
