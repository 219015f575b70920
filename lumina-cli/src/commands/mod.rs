//! CLI command implementations

mod batch;
mod catalog;
mod info;
mod paginate;
mod spread;

pub use batch::batch;
pub use catalog::catalog;
pub use info::info;
pub use paginate::paginate;
pub use spread::spread;

use anyhow::{bail, Context, Result};
use lumina_core::storefront::UploadKind;
use lumina_core::types::{Page, Segment};
use std::path::Path;

/// A text book read from disk
pub(crate) struct TextFile {
    pub title: String,
    pub text: String,
}

/// Read a `.txt` or `.md` file. EPUBs are rejected since only the EPUB
/// engine can lay them out.
pub(crate) fn read_text_file(input: &str) -> Result<TextFile> {
    let path = Path::new(input);

    match UploadKind::from_filename(input) {
        Some(UploadKind::PlainText | UploadKind::Markdown) => {}
        Some(UploadKind::Epub) => {
            bail!("{} is an EPUB; only .txt and .md books can be paginated", input)
        }
        None => bail!("Unsupported file type: {} (expected .txt or .md)", input),
    }

    let data =
        std::fs::read(path).with_context(|| format!("Failed to open input file: {}", input))?;
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(input)
        .to_string();

    Ok(TextFile {
        title,
        text: String::from_utf8_lossy(&data).into_owned(),
    })
}

/// One-line rendering of a page for terminal output
pub(crate) fn render_page(page: &Page) -> String {
    let mut out = String::new();
    for segment in page.segments() {
        match segment {
            Segment::TextRun { text } => out.push_str(text),
            Segment::ImageRef { src } => {
                out.push_str(&format!("[image: {}]", src));
            }
        }
    }
    out
}
