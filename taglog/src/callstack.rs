//! Call-stack capture and external-frame discovery.
//!
//! Every attributed log call captures the calling thread's stack and walks it
//! to find the first frame that does NOT belong to this crate. The walk is a
//! two-phase linear scan:
//!
//! 1. Skip leading frames (capture machinery, allocator, whatever) until a
//!    frame carrying the facility's own symbol prefix is seen.
//! 2. From there, the next frame whose symbol does not carry the prefix is
//!    the external call site.
//!
//! Phase 1 guarantees correctness even when the facility goes through several
//! internal helpers before reaching the walker - those frames still match the
//! facility prefix and are skipped.
//!
//! # Accepted limitation
//!
//! Frames that lost their symbol through inlining, or monomorphized/trampoline
//! symbols that do not carry the facility prefix, degrade attribution to
//! whatever frame the scan lands on. No attempt is made to see through them.

use std::fmt;

use crate::resolver;

/// Sentinel rendered when no external call site could be found.
pub const UNKNOWN_SITE: &str = "[]";

/// One captured stack frame: demangled symbol path plus source line.
///
/// The trailing legacy-mangling hash is already stripped; `line` is `0` when
/// debug info was unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully qualified function path, e.g. `myapp::widget::Widget::refresh`.
    pub symbol: String,
    /// Source line of the frame, or 0 if unknown.
    pub line: u32,
}

impl StackFrame {
    /// Build a frame from a symbol path and line.
    pub fn new(symbol: impl Into<String>, line: u32) -> Self {
        Self {
            symbol: symbol.into(),
            line,
        }
    }

    /// The symbol path used for facility-prefix matching.
    ///
    /// Trait-impl symbols demangle as `<X as Y>::method`; the leading angle
    /// bracket is ignored so they still match a plain path prefix.
    fn declaring_path(&self) -> &str {
        self.symbol.trim_start_matches('<')
    }
}

/// An immutable snapshot of the external call site of one log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Short name of the enclosing type (or module, for free functions).
    pub type_name: String,
    /// Name of the calling function.
    pub method_name: String,
    /// Source line of the call, or 0 if unknown.
    pub line: u32,
}

impl CallSite {
    /// The sentinel call site used when attribution fails.
    pub fn unknown() -> Self {
        Self {
            type_name: UNKNOWN_SITE.to_string(),
            method_name: String::new(),
            line: 0,
        }
    }

    /// Whether this is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        self.type_name == UNKNOWN_SITE
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str(UNKNOWN_SITE)
        } else {
            write!(f, "{}:{}:{}", self.type_name, self.method_name, self.line)
        }
    }
}

/// Capture the current thread's stack as resolved frames, most recent first.
///
/// Frames without a resolvable symbol name are dropped; they cannot take part
/// in prefix matching anyway.
pub fn capture() -> Vec<StackFrame> {
    let bt = backtrace::Backtrace::new();
    let mut frames = Vec::new();
    for frame in bt.frames() {
        for symbol in frame.symbols() {
            if let Some(name) = symbol.name() {
                let demangled = name.to_string();
                frames.push(StackFrame {
                    symbol: resolver::strip_hash(&demangled).to_string(),
                    line: symbol.lineno().unwrap_or(0),
                });
            }
        }
    }
    frames
}

/// Index of the first external frame after the facility's own frames.
///
/// Returns `None` when no facility frame exists, or when nothing but
/// facility frames follow it.
pub fn find_external_index(frames: &[StackFrame], own_prefix: &str) -> Option<usize> {
    let mut found = false;
    for (i, frame) in frames.iter().enumerate() {
        if found {
            if !frame.declaring_path().starts_with(own_prefix) {
                return Some(i);
            }
        } else if frame.declaring_path().starts_with(own_prefix) {
            found = true;
        }
    }
    None
}

/// The first external frame after the facility's own frames.
pub fn find_external_frame<'a>(
    frames: &'a [StackFrame],
    own_prefix: &str,
) -> Option<&'a StackFrame> {
    find_external_index(frames, own_prefix).map(|i| &frames[i])
}

/// Resolve the external call site from captured frames.
///
/// Falls back to [`CallSite::unknown`] instead of failing when no external
/// frame exists (e.g. the facility was called from its own tests).
pub fn call_site(frames: &[StackFrame], own_prefix: &str) -> CallSite {
    match find_external_frame(frames, own_prefix) {
        Some(frame) => resolver::resolve(&frame.symbol, frame.line),
        None => CallSite::unknown(),
    }
}
