//! Info command implementation

use super::read_text_file;
use anyhow::{Context, Result};
use lumina_core::reader::{paginate, parse};
use lumina_core::types::Segment;
use serde::Serialize;

/// Book info output
#[derive(Serialize)]
struct BookInfo {
    title: String,
    characters: usize,
    segments: usize,
    images: usize,
    page_char_budget: i64,
    pages: usize,
    spreads: usize,
}

/// Display pagination statistics for a text book
pub fn info(input: &str, budget: i64, json: bool) -> Result<()> {
    let file = read_text_file(input)?;
    let segments = parse(&file.text);
    let pages =
        paginate(&segments, budget).with_context(|| format!("Failed to paginate {}", input))?;

    let info = BookInfo {
        title: file.title,
        characters: segments.iter().map(Segment::char_len).sum(),
        segments: segments.len(),
        images: segments.iter().filter(|s| s.is_image()).count(),
        page_char_budget: budget,
        pages: pages.len(),
        spreads: pages.len() / 2,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:       {}", info.title);
        println!("Characters:  {}", info.characters);
        println!("Segments:    {}", info.segments);
        println!("Images:      {}", info.images);
        println!("Budget:      {}", info.page_char_budget);
        println!("Pages:       {}", info.pages);
        println!("Spreads:     {}", info.spreads);
    }

    Ok(())
}
