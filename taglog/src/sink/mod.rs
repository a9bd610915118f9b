//! Sink abstraction layer.
//!
//! This module decouples the logging facade from any concrete output: the
//! facade composes a tag and a message, then hands both to a [`LogSink`].
//! The facade's job ends there - filtering, persistence, and transport are
//! the sink's business (or nobody's).
//!
//! # Architecture
//!
//! - `LogSink` trait: the four-argument "write line at severity" contract
//! - `TracingSink`: production sink that delegates to the `tracing` crate
//! - `NoOpSink`: silent sink for benchmarks and disabled embedding
//! - `RecordingSink`: captures entries and counts writes, for tests
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use taglog::facade::LogFacade;
//! use taglog::sink::RecordingSink;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let log = LogFacade::new(sink.clone());
//! log.warn("tile fetch is slow");
//! assert_eq!(sink.writes(), 1);
//! ```

mod noop;
mod recording;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpSink;
pub use r#trait::LogSink;
pub use recording::{RecordedEntry, RecordingSink};
pub use tracing_adapter::TracingSink;
