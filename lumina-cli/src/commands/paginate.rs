//! Paginate command implementation

use super::{read_text_file, render_page};
use anyhow::{Context, Result};
use lumina_core::reader::{paginate as paginate_segments, parse};

/// Print every page of a text book
pub fn paginate(input: &str, budget: i64, json: bool) -> Result<()> {
    let file = read_text_file(input)?;
    let pages = paginate_segments(&parse(&file.text), budget)
        .with_context(|| format!("Failed to paginate {}", input))?;

    tracing::debug!(input, pages = pages.len(), "paginated");

    if json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    for (index, page) in pages.iter().enumerate() {
        println!("--- Page {} of {} ---", index + 1, pages.len());
        println!("{}", render_page(page));
    }

    Ok(())
}
