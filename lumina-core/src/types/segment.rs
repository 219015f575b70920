//! Parsed units of plain-text book content

use serde::{Deserialize, Serialize};

/// A unit of book content: a run of prose or an inline illustration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Contiguous run of text. Never contains an image marker.
    TextRun { text: String },

    /// Reference to an illustration. `src` is opaque and may be empty.
    ImageRef { src: String },
}

impl Segment {
    /// Create a text run
    pub fn text(text: impl Into<String>) -> Self {
        Segment::TextRun { text: text.into() }
    }

    /// Create an image reference
    pub fn image(src: impl Into<String>) -> Self {
        Segment::ImageRef { src: src.into() }
    }

    /// Number of characters counted against the page budget.
    /// Images always count as zero.
    pub fn char_len(&self) -> usize {
        match self {
            Segment::TextRun { text } => text.chars().count(),
            Segment::ImageRef { .. } => 0,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Segment::ImageRef { .. })
    }

    /// The text of a text run
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::TextRun { text } => Some(text),
            Segment::ImageRef { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_counts_as_zero() {
        let image = Segment::image("https://example.com/a-very-long-url.png");
        assert_eq!(image.char_len(), 0);
        assert!(image.is_image());
        assert_eq!(image.as_text(), None);
    }

    #[test]
    fn test_char_len_counts_scalar_values() {
        assert_eq!(Segment::text("héllo").char_len(), 5);
        assert_eq!(Segment::text("—").char_len(), 1);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_value(Segment::image("img1")).unwrap();
        assert_eq!(json["type"], "image_ref");
        assert_eq!(json["src"], "img1");
    }
}
