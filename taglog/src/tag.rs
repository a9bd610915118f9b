//! Tag composition and column alignment.
//!
//! A tag is the short label prefixed to a log line identifying its origin:
//! an optional global stamp, an optional context-object segment, and the
//! resolved call site. Under the [`TagStyle::Aligned`] style tags are padded
//! to a running maximum width and terminated with an alignment glyph, so
//! message bodies line up in one column regardless of tag length.
//!
//! Composition must never break the caller's real logic: the whole assembly
//! runs under `catch_unwind`, and a panic is replaced by a fixed placeholder
//! tag while a degradation counter is bumped for observability.

#[cfg(test)]
use std::cell::Cell;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::callstack::CallSite;
use crate::resolver;

/// Initial running maximum tag width.
pub const DEFAULT_MAX_TAG_WIDTH: usize = 40;

/// Glyph terminating an aligned tag.
pub const ALIGN_GLYPH: char = '\u{21DB}';

/// Marker used in place of a context type that has no name (a closure).
pub const ANONYMOUS_MARKER: &str = "(Anonymous Class)";

/// Separator between the context segment and the call site.
pub const CALLER_ARROW: &str = "<- ";

/// Placeholder produced when tag composition itself panicked.
pub const DEGRADED_TAG: &str = "[taglog: tag formatting failed] ";

const THREAD_MARK: &str = "\u{25AA} Thread ";
const NAME_LABEL: &str = "Name:";
const ID_LABEL: &str = "|id:";

/// Tag rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagStyle {
    /// Pad tags to a running maximum width so messages line up (default).
    #[default]
    Aligned,
    /// Emit the bare tag without padding.
    Plain,
}

impl TagStyle {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            TagStyle::Aligned => 0,
            TagStyle::Plain => 1,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => TagStyle::Plain,
            _ => TagStyle::Aligned,
        }
    }
}

/// Inputs for one tag composition.
pub(crate) struct TagRequest<'a> {
    /// Optional global stamp (build id or similar).
    pub stamp: Option<&'a str>,
    /// Rendering style.
    pub style: TagStyle,
    /// Fully qualified type name of the caller-supplied context object.
    pub context: Option<&'a str>,
    /// Resolved external call site.
    pub site: &'a CallSite,
}

#[cfg(test)]
thread_local! {
    static FAIL_NEXT_COMPOSITION: Cell<bool> = Cell::new(false);
}

/// Arm a one-shot panic inside the next guarded composition on this thread,
/// to exercise the degradation path.
#[cfg(test)]
pub(crate) fn fail_next_composition() {
    FAIL_NEXT_COMPOSITION.with(|flag| flag.set(true));
}

/// Run one tag assembly under `catch_unwind`, turning any panic into the
/// placeholder tag and a counter bump. Every tag path goes through here.
fn absorbing<F>(degraded: &AtomicU64, build: F) -> String
where
    F: FnOnce() -> String,
{
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        #[cfg(test)]
        FAIL_NEXT_COMPOSITION.with(|flag| {
            if flag.replace(false) {
                panic!("armed composition failure");
            }
        });
        build()
    }));
    match attempt {
        Ok(tag) => tag,
        Err(_) => {
            degraded.fetch_add(1, Ordering::Relaxed);
            DEGRADED_TAG.to_string()
        }
    }
}

/// Compose a tag, absorbing any panic into the placeholder tag.
pub(crate) fn compose(
    request: &TagRequest<'_>,
    max_width: &AtomicUsize,
    degraded: &AtomicU64,
) -> String {
    absorbing(degraded, || compose_inner(request, max_width))
}

fn compose_inner(request: &TagRequest<'_>, max_width: &AtomicUsize) -> String {
    let mut tag = String::new();
    push_stamp(&mut tag, request.stamp);
    if let Some(context) = request.context {
        let before = tag.len();
        push_context(&mut tag, context);
        // Arrow only when a context segment was actually written, to read as
        // "this caller, invoked from this site".
        if tag.len() > before {
            tag.push_str(CALLER_ARROW);
        }
    }
    push_site(&mut tag, request.site);
    if request.style == TagStyle::Aligned {
        pad(&mut tag, max_width);
    }
    tag
}

fn push_stamp(tag: &mut String, stamp: Option<&str>) {
    if let Some(stamp) = stamp {
        if !stamp.is_empty() {
            tag.push_str(stamp);
            tag.push(' ');
        }
    }
}

fn push_context(tag: &mut String, context: &str) {
    if resolver::is_anonymous(context) {
        tag.push_str(ANONYMOUS_MARKER);
        tag.push(' ');
    } else {
        let simple = resolver::simple_name(context);
        if !simple.is_empty() {
            tag.push('(');
            tag.push_str(&simple);
            tag.push_str(") ");
        }
    }
}

fn push_site(tag: &mut String, site: &CallSite) {
    if site.is_unknown() {
        tag.push_str(crate::callstack::UNKNOWN_SITE);
    } else {
        let _ = write!(
            tag,
            "({}:{}:{})",
            site.type_name, site.method_name, site.line
        );
    }
}

/// Right-pad to the running maximum width and append the alignment glyph.
///
/// A longer tag raises the width for subsequent calls (`fetch_max`, so the
/// width only ever grows); the current tag is emitted unpadded.
fn pad(tag: &mut String, max_width: &AtomicUsize) {
    tag.push(' ');
    let len = tag.chars().count();
    let width = max_width.load(Ordering::Relaxed);
    if len < width {
        for _ in 0..width - len {
            tag.push(' ');
        }
    } else {
        max_width.fetch_max(len, Ordering::Relaxed);
    }
    tag.push(ALIGN_GLYPH);
}

/// Compose the thread-metadata tag used by the thread-info entry points.
///
/// Embeds the current thread's name and numeric id with fixed field labels.
/// This path is independent of call-site attribution; the alignment padding
/// and the panic-absorbing boundary are shared.
pub(crate) fn thread_tag(
    stamp: Option<&str>,
    style: TagStyle,
    max_width: &AtomicUsize,
    degraded: &AtomicU64,
) -> String {
    absorbing(degraded, || thread_tag_inner(stamp, style, max_width))
}

fn thread_tag_inner(stamp: Option<&str>, style: TagStyle, max_width: &AtomicUsize) -> String {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>").to_string();
    // ThreadId has no stable numeric accessor; its Debug form is "ThreadId(n)".
    let id: String = format!("{:?}", thread.id())
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let mut tag = String::new();
    tag.push_str(THREAD_MARK);
    push_stamp(&mut tag, stamp);
    tag.push_str(NAME_LABEL);
    tag.push_str(&name);
    tag.push_str(ID_LABEL);
    tag.push_str(&id);
    if style == TagStyle::Aligned {
        pad(&mut tag, max_width);
    }
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_site() -> CallSite {
        CallSite {
            type_name: "Widget".to_string(),
            method_name: "refresh".to_string(),
            line: 42,
        }
    }

    fn compose_with(
        stamp: Option<&str>,
        style: TagStyle,
        context: Option<&str>,
        site: &CallSite,
        width: usize,
    ) -> (String, usize) {
        let max_width = AtomicUsize::new(width);
        let degraded = AtomicU64::new(0);
        let tag = compose(
            &TagRequest {
                stamp,
                style,
                context,
                site,
            },
            &max_width,
            &degraded,
        );
        (tag, max_width.load(Ordering::Relaxed))
    }

    #[test]
    fn test_plain_style_skips_padding() {
        let (tag, width) =
            compose_with(None, TagStyle::Plain, None, &widget_site(), DEFAULT_MAX_TAG_WIDTH);
        assert_eq!(tag, "(Widget:refresh:42)");
        assert_eq!(width, DEFAULT_MAX_TAG_WIDTH);
    }

    #[test]
    fn test_stamp_prefixes_tag() {
        let (tag, _) = compose_with(Some("build-7"), TagStyle::Plain, None, &widget_site(), 40);
        assert_eq!(tag, "build-7 (Widget:refresh:42)");
    }

    #[test]
    fn test_empty_stamp_is_skipped() {
        let (tag, _) = compose_with(Some(""), TagStyle::Plain, None, &widget_site(), 40);
        assert_eq!(tag, "(Widget:refresh:42)");
    }

    #[test]
    fn test_aligned_pads_to_running_width() {
        let (tag, width) = compose_with(None, TagStyle::Aligned, None, &widget_site(), 40);
        // "(Widget:refresh:42)" + space = 20 chars, padded to 40 + glyph.
        assert_eq!(tag.chars().count(), 41);
        assert!(tag.ends_with(ALIGN_GLYPH));
        assert!(tag.starts_with("(Widget:refresh:42) "));
        assert_eq!(width, 40, "shorter tag must not change the width");
    }

    #[test]
    fn test_longer_tag_raises_running_width_for_next_call() {
        // "build-7 (Widget:refresh:42)" + space = 28 chars > 20.
        let (tag, width) =
            compose_with(Some("build-7"), TagStyle::Aligned, None, &widget_site(), 20);
        assert_eq!(tag, format!("build-7 (Widget:refresh:42) {}", ALIGN_GLYPH));
        assert_eq!(width, 28, "running width grows to the observed length");
    }

    #[test]
    fn test_width_is_monotonic_across_calls() {
        let max_width = AtomicUsize::new(10);
        let degraded = AtomicU64::new(0);
        let site = widget_site();
        let mut last = 10;
        for stamp in ["a", "a-longer-stamp", "b", "the-longest-stamp-of-all", "c"] {
            compose(
                &TagRequest {
                    stamp: Some(stamp),
                    style: TagStyle::Aligned,
                    context: None,
                    site: &site,
                },
                &max_width,
                &degraded,
            );
            let width = max_width.load(Ordering::Relaxed);
            assert!(width >= last, "width must never shrink");
            last = width;
        }
    }

    #[test]
    fn test_identical_requests_compose_identical_tags() {
        let max_width = AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH);
        let degraded = AtomicU64::new(0);
        let site = widget_site();
        let request = TagRequest {
            stamp: Some("build-7"),
            style: TagStyle::Aligned,
            context: None,
            site: &site,
        };
        let first = compose(&request, &max_width, &degraded);
        let second = compose(&request, &max_width, &degraded);
        assert_eq!(first, second);
    }

    #[test]
    fn test_named_context_segment() {
        let (tag, _) = compose_with(
            None,
            TagStyle::Plain,
            Some("myapp::controller::Controller"),
            &widget_site(),
            40,
        );
        assert_eq!(tag, "(Controller) <- (Widget:refresh:42)");
    }

    #[test]
    fn test_anonymous_context_uses_marker() {
        let (tag, _) = compose_with(
            None,
            TagStyle::Plain,
            Some("myapp::controller::Controller::bind::{{closure}}"),
            &widget_site(),
            40,
        );
        let marker_at = tag.find(ANONYMOUS_MARKER).expect("marker present");
        let arrow_at = tag.find(CALLER_ARROW).expect("arrow present");
        let site_at = tag.find("(Widget:refresh:42)").expect("site present");
        assert!(marker_at < arrow_at && arrow_at < site_at);
    }

    #[test]
    fn test_unknown_site_renders_sentinel() {
        let (tag, _) = compose_with(None, TagStyle::Plain, None, &CallSite::unknown(), 40);
        assert_eq!(tag, "[]");
    }

    #[test]
    fn test_thread_tag_carries_name_and_id() {
        let max_width = AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH);
        let degraded = AtomicU64::new(0);
        let tag = thread_tag(None, TagStyle::Plain, &max_width, &degraded);
        assert!(tag.starts_with(THREAD_MARK));
        assert!(tag.contains(NAME_LABEL));
        assert!(tag.contains(ID_LABEL));
    }

    #[test]
    fn test_thread_tag_aligned_ends_with_glyph() {
        let max_width = AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH);
        let degraded = AtomicU64::new(0);
        let tag = thread_tag(Some("build-7"), TagStyle::Aligned, &max_width, &degraded);
        assert!(tag.ends_with(ALIGN_GLYPH));
        assert!(tag.contains("build-7 "));
    }

    #[test]
    fn test_composition_panic_yields_placeholder_and_counts() {
        let max_width = AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH);
        let degraded = AtomicU64::new(0);
        let site = widget_site();
        let request = TagRequest {
            stamp: None,
            style: TagStyle::Plain,
            context: None,
            site: &site,
        };

        fail_next_composition();
        let tag = compose(&request, &max_width, &degraded);
        assert_eq!(tag, DEGRADED_TAG);
        assert_eq!(degraded.load(Ordering::Relaxed), 1);

        // The failure is one-shot; the next composition is back to normal.
        let tag = compose(&request, &max_width, &degraded);
        assert_eq!(tag, "(Widget:refresh:42)");
        assert_eq!(degraded.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_thread_tag_panic_yields_placeholder_and_counts() {
        let max_width = AtomicUsize::new(DEFAULT_MAX_TAG_WIDTH);
        let degraded = AtomicU64::new(0);

        fail_next_composition();
        let tag = thread_tag(None, TagStyle::Plain, &max_width, &degraded);
        assert_eq!(tag, DEGRADED_TAG);
        assert_eq!(degraded.load(Ordering::Relaxed), 1);

        let tag = thread_tag(None, TagStyle::Plain, &max_width, &degraded);
        assert!(tag.starts_with(THREAD_MARK));
        assert_eq!(degraded.load(Ordering::Relaxed), 1);
    }
}
