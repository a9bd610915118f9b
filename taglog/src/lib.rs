//! TagLog - call-site attributing diagnostic logger
//!
//! This library provides a logging facade that works out who called it. Every
//! log line is attributed to its true call site (type, function, source line)
//! by walking the current call stack and skipping the facility's own frames,
//! so callers never pass location information by hand.
//!
//! # High-Level API
//!
//! For most use cases, the crate-root functions log through the process-wide
//! facade:
//!
//! ```
//! taglog::set_stamp("build-7");
//! taglog::info("scenery cache warmed");
//! ```
//!
//! Components that want an injectable logger (for example to capture output
//! in tests) construct their own [`facade::LogFacade`] over any
//! [`sink::LogSink`] implementation:
//!
//! ```
//! use std::sync::Arc;
//! use taglog::facade::LogFacade;
//! use taglog::sink::RecordingSink;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let log = LogFacade::new(sink.clone());
//! log.info("captured, not printed");
//! assert_eq!(sink.writes(), 1);
//! ```

pub mod callstack;
pub mod facade;
pub mod fault;
pub mod lifecycle;
pub mod logging;
pub mod pretty;
pub mod resolver;
pub mod severity;
pub mod sink;
pub mod tag;

pub use facade::{global, LogFacade};
pub use fault::Fault;
pub use severity::Severity;
pub use tag::TagStyle;

/// Version of the TagLog library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Symbol prefix identifying the facility's own stack frames.
///
/// The stack walker skips every frame whose demangled symbol starts with this
/// prefix before it picks the external call site.
pub(crate) const FACILITY_PREFIX: &str = concat!(module_path!(), "::");

/// Log a TRACE message through the process-wide facade.
pub fn trace(message: &str) {
    global().trace(message);
}

/// Log a DEBUG message through the process-wide facade.
pub fn debug(message: &str) {
    global().debug(message);
}

/// Log an INFO message through the process-wide facade.
pub fn info(message: &str) {
    global().info(message);
}

/// Log a WARN message through the process-wide facade.
pub fn warn(message: &str) {
    global().warn(message);
}

/// Log an ERROR message through the process-wide facade.
pub fn error(message: &str) {
    global().error(message);
}

/// Log a FATAL message through the process-wide facade.
pub fn fatal(message: &str) {
    global().fatal(message);
}

/// Enable or disable the process-wide facade.
pub fn set_enabled(enabled: bool) {
    global().set_enabled(enabled);
}

/// Set the stamp prefixed to every tag of the process-wide facade.
pub fn set_stamp(stamp: impl Into<String>) {
    global().set_stamp(stamp);
}

/// Set the tag style of the process-wide facade.
pub fn set_style(style: TagStyle) {
    global().set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }

    #[test]
    fn test_facility_prefix_names_this_crate() {
        assert_eq!(FACILITY_PREFIX, "taglog::");
    }
}
