//! Spread command implementation

use super::{read_text_file, render_page};
use anyhow::{Context, Result};
use lumina_core::reader::ReaderSession;
use lumina_core::types::UNKNOWN_AUTHOR;

/// Turn forward `spreads` times and print the spread that ends up visible
pub fn spread(input: &str, budget: i64, spreads: usize) -> Result<()> {
    let file = read_text_file(input)?;
    let mut session =
        ReaderSession::from_text(&file.title, &file.title, UNKNOWN_AUTHOR, &file.text, budget)
            .with_context(|| format!("Failed to open {}", input))?;

    let mut turned = 0;
    while turned < spreads && session.next() {
        session.complete_transition();
        turned += 1;
    }
    if turned < spreads {
        println!(
            "Reached the last spread after {} of {} turns",
            turned, spreads
        );
    }

    let view = session.view();
    println!("{} ({})", view.title, view.page_label);
    println!("--- Left ---");
    println!("{}", render_page(&view.left));
    println!("--- Right ---");
    println!("{}", render_page(&view.right));

    Ok(())
}
