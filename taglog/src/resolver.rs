//! Short-name resolution for symbol paths and type names.
//!
//! Demangled Rust symbols and `std::any::type_name` output are fully
//! qualified paths such as `myapp::widget::Widget::refresh` or, for closures,
//! `myapp::widget::Widget::refresh::{{closure}}`. Tags want the short,
//! human-friendly form (`Widget`), so this module collapses paths back to
//! their nearest enclosing named segment:
//!
//! - synthetic trailing segments (`{{closure}}`, `{{vtable.shim}}`) are
//!   stripped, so an inline closure inside `Widget::refresh` resolves to
//!   `Widget`, not to the synthetic name;
//! - generic parameters are removed (`Option<String>::map` -> `Option::map`);
//! - trait-impl qualifications are flattened
//!   (`<Widget as Render>::draw` -> `Widget::draw`);
//! - the legacy mangling hash (`::h1f0a...`) is dropped.
//!
//! Nothing here can fail: a path with no named segment resolves to the empty
//! string.

use crate::callstack::CallSite;

/// Strip a trailing legacy-mangling hash segment (`::h` + 16 hex digits).
pub fn strip_hash(symbol: &str) -> &str {
    if let Some(idx) = symbol.rfind("::h") {
        let tail = &symbol[idx + 3..];
        if tail.len() == 16 && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &symbol[..idx];
        }
    }
    symbol
}

/// Whether a path names a compiler-synthesized (anonymous) scope.
///
/// Closures are the Rust analog of anonymous inner classes: their type and
/// symbol names carry a `{{closure}}` segment instead of a real name.
pub fn is_anonymous(path: &str) -> bool {
    path.contains("{{closure}}")
}

fn is_synthetic(segment: &str) -> bool {
    segment.starts_with("{{")
}

/// Flatten a trait-impl qualification: `<X as Y>::method` becomes
/// `X::method`. Paths without the qualification are returned unchanged.
fn flatten_impl(symbol: &str) -> String {
    if let Some(rest) = symbol.strip_prefix('<') {
        if let Some(as_idx) = rest.find(" as ") {
            if let Some(gt_off) = rest[as_idx..].find(">::") {
                let type_part = &rest[..as_idx];
                let method_part = &rest[as_idx + gt_off + 1..];
                return format!("{}{}", type_part, method_part);
            }
        }
    }
    symbol.to_string()
}

/// Remove generic parameter lists, tracking nesting depth.
fn strip_generics(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for ch in path.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Path segments with hash, generics, and trait qualification removed.
fn named_segments(path: &str) -> Vec<String> {
    let flat = strip_generics(&flatten_impl(strip_hash(path)));
    flat.split("::")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// The last non-synthetic segment of a path, or the empty string.
///
/// This is the tag form of a context object's type name: `myapp::Controller`
/// resolves to `Controller`, and a closure defined inside
/// `myapp::Controller::bind` resolves to `bind`'s enclosing named segment.
pub fn simple_name(path: &str) -> String {
    let mut segments = named_segments(path);
    while segments.last().map_or(false, |s| is_synthetic(s)) {
        segments.pop();
    }
    segments.pop().unwrap_or_default()
}

/// Resolve a function symbol into a [`CallSite`].
///
/// The last named segment is the method, the one before it the enclosing
/// type (or module, for free functions). Synthetic closure segments are
/// collapsed first, so a log call made inside a closure is attributed to the
/// function that contains the closure.
pub fn resolve(symbol: &str, line: u32) -> CallSite {
    let mut segments = named_segments(symbol);
    while segments.last().map_or(false, |s| is_synthetic(s)) {
        segments.pop();
    }
    let method_name = segments.pop().unwrap_or_default();
    let type_name = segments.pop().unwrap_or_default();
    CallSite {
        type_name,
        method_name,
        line,
    }
}
