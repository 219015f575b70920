//! Greedy fixed-capacity pagination
//!
//! Capacity is a raw character budget per page: no font metrics, no line
//! wrapping. Characters are Unicode scalar values, so a split never lands
//! inside a multi-byte character.

use crate::error::ReaderError;
use crate::types::{Page, Segment};

/// Characters per page when nothing else is configured
pub const DEFAULT_PAGE_CHAR_BUDGET: i64 = 650;

/// Check a page budget, returning it as a usable capacity
pub fn validate_budget(page_char_budget: i64) -> Result<usize, ReaderError> {
    usize::try_from(page_char_budget)
        .ok()
        .filter(|budget| *budget > 0)
        .ok_or(ReaderError::InvalidArgument(page_char_budget))
}

/// Partition segments into pages of at most `page_char_budget` characters.
///
/// Images always get a page of their own. The result is never empty and
/// always has an even length so every page has a spread partner.
pub fn paginate(segments: &[Segment], page_char_budget: i64) -> Result<Vec<Page>, ReaderError> {
    let budget = validate_budget(page_char_budget)?;

    let mut pages = Vec::new();
    let mut current = Page::new();
    let mut used = 0usize;

    for segment in segments {
        match segment {
            Segment::ImageRef { src } => {
                if !current.is_empty() {
                    pages.push(std::mem::take(&mut current));
                }
                pages.push(Page::image(src.clone()));
                used = 0;
            }
            Segment::TextRun { text } => {
                let mut rest = text.as_str();
                while !rest.is_empty() {
                    let room = budget - used;
                    let split = byte_offset_of_char(rest, room);

                    if split == rest.len() {
                        current.push(Segment::text(rest));
                        used += rest.chars().count();
                        break;
                    }

                    // A page filled exactly by the previous run gets no empty slice
                    if split > 0 {
                        current.push(Segment::text(&rest[..split]));
                    }
                    pages.push(std::mem::take(&mut current));
                    used = 0;
                    rest = &rest[split..];
                }
            }
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }

    if pages.is_empty() {
        pages.push(Page::from(vec![Segment::text("")]));
    }

    if pages.len() % 2 != 0 {
        pages.push(Page::new());
    }

    tracing::debug!(
        segments = segments.len(),
        pages = pages.len(),
        budget,
        "paginated content"
    );

    Ok(pages)
}

/// Byte offset of the `n`th character, or the string length if it is shorter
fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}
