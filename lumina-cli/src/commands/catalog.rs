//! Catalog command implementation

use anyhow::{Context, Result};
use lumina_core::storefront::Catalog;
use serde::Serialize;

#[derive(Serialize)]
struct CatalogEntry {
    id: String,
    title: String,
    author: String,
    price: String,
}

#[derive(Serialize)]
struct PublisherEntry {
    key: &'static str,
    name: &'static str,
    books: usize,
}

/// List the built-in publishers, or one publisher's books with prices
pub fn catalog(publisher: Option<&str>, json: bool) -> Result<()> {
    let catalog = Catalog::builtin();

    let Some(key) = publisher else {
        let publishers: Vec<PublisherEntry> = catalog
            .publishers()
            .iter()
            .map(|p| PublisherEntry {
                key: p.key(),
                name: p.theme.app_name,
                books: p.books.len(),
            })
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&publishers)?);
        } else {
            for p in &publishers {
                println!("{:<10} {:<22} {} books", p.key, p.name, p.books);
            }
        }
        return Ok(());
    };

    let publisher = catalog
        .publisher(key)
        .with_context(|| format!("Unknown publisher: {}", key))?;

    let entries: Vec<CatalogEntry> = publisher
        .books
        .iter()
        .map(|b| CatalogEntry {
            id: b.id.clone(),
            title: b.title.clone(),
            author: b.author.clone(),
            price: b.effective_price().to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", publisher.theme.app_name);
        for e in &entries {
            println!("  {:<6} {:<28} {:<18} {}", e.id, e.title, e.author, e.price);
        }
    }

    Ok(())
}
