//! Inline image marker parsing
//!
//! Plain-text books embed illustrations as `[IMAGE:<src>]`. Every complete
//! marker becomes a segment boundary; anything else is literal text.

use crate::types::Segment;
use regex::Regex;
use std::sync::LazyLock;

/// Matches `[IMAGE:<src>]` where `<src>` contains no `]`
static IMAGE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[IMAGE:([^\]]*)\]").expect("image marker pattern is valid")
});

/// Split raw book text into text runs and image references.
///
/// Empty text between markers is dropped. Never fails.
pub fn parse(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in IMAGE_MARKER_RE.captures_iter(raw) {
        let (Some(marker), Some(src)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if marker.start() > last {
            segments.push(Segment::text(&raw[last..marker.start()]));
        }
        segments.push(Segment::image(src.as_str()));
        last = marker.end();
    }

    if last < raw.len() {
        segments.push(Segment::text(&raw[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("Hello"), vec![Segment::text("Hello")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_marker_between_text() {
        assert_eq!(
            parse("A[IMAGE:http://x/y.png]B"),
            vec![
                Segment::text("A"),
                Segment::image("http://x/y.png"),
                Segment::text("B"),
            ]
        );
    }

    #[test]
    fn test_adjacent_markers_drop_empty_text() {
        assert_eq!(
            parse("[IMAGE:a][IMAGE:b]"),
            vec![Segment::image("a"), Segment::image("b")]
        );
    }

    #[test]
    fn test_empty_src() {
        assert_eq!(
            parse("x[IMAGE:]"),
            vec![Segment::text("x"), Segment::image("")]
        );
    }

    #[test]
    fn test_malformed_markers_are_text() {
        let raw = "see [IMAGE:unterminated and [image:lower] and [IMAGE missing colon]";
        assert_eq!(parse(raw), vec![Segment::text(raw)]);
    }

    #[test]
    fn test_src_stops_at_first_bracket() {
        assert_eq!(
            parse("[IMAGE:a[b]c]"),
            vec![Segment::image("a[b"), Segment::text("c]")]
        );
    }

    #[test]
    fn test_src_may_span_lines() {
        assert_eq!(parse("[IMAGE:a\nb]"), vec![Segment::image("a\nb")]);
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        assert_eq!(
            parse("end.\n\n[IMAGE:ship.png]\n\nStart"),
            vec![
                Segment::text("end.\n\n"),
                Segment::image("ship.png"),
                Segment::text("\n\nStart"),
            ]
        );
    }
}
