//! A single reader page

use super::Segment;
use serde::{Deserialize, Serialize};

/// An ordered group of segments displayed together.
///
/// Text pages stay within the page budget. A page holding a single image is
/// exempt from the budget, and an empty page pads the last spread.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Page {
    segments: Vec<Segment>,
}

impl Page {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page holding only an image
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::image(src)],
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// True when the page holds no segments at all
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Characters counted against the budget
    pub fn char_count(&self) -> usize {
        self.segments.iter().map(Segment::char_len).sum()
    }

    /// True for a page consisting of exactly one image
    pub fn is_image_page(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::ImageRef { .. }])
    }

    pub fn contains_image(&self) -> bool {
        self.segments.iter().any(Segment::is_image)
    }

    /// Concatenated text of all text runs on this page
    pub fn text(&self) -> String {
        self.segments.iter().filter_map(Segment::as_text).collect()
    }
}

impl From<Vec<Segment>> for Page {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_page() {
        let page = Page::image("img1");
        assert!(page.is_image_page());
        assert_eq!(page.char_count(), 0);

        let mixed = Page::from(vec![Segment::text("a"), Segment::image("img1")]);
        assert!(!mixed.is_image_page());
        assert!(mixed.contains_image());
    }

    #[test]
    fn test_text_concatenates_runs() {
        let page = Page::from(vec![Segment::text("ab"), Segment::text("cd")]);
        assert_eq!(page.text(), "abcd");
        assert_eq!(page.char_count(), 4);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_serializes_as_segment_list() {
        let json = serde_json::to_value(Page::new()).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
