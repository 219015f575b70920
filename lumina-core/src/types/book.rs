//! Catalog and uploaded books

use super::Price;
use serde::{Deserialize, Serialize};

/// Author recorded for uploads that carry no author metadata
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A book in a publisher catalog or a user's uploads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Catalog id (`pub-1`) or a uuid for uploads
    pub id: String,

    pub title: String,

    pub author: String,

    pub cover_url: String,

    pub content: BookContent,

    /// Catalog price; uploads have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    /// Whether this book was uploaded by the user
    #[serde(default)]
    pub is_user_book: bool,
}

/// Where a book's readable content lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BookContent {
    /// Plain text, possibly with `[IMAGE:...]` markers
    Text(String),

    /// EPUB served from a URL, rendered by the EPUB engine
    EpubUrl(String),

    /// Uploaded EPUB bytes, rendered by the EPUB engine
    Epub(#[serde(with = "base64_serde")] Vec<u8>),
}

impl Book {
    /// Create a plain-text catalog book
    pub fn text(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            cover_url: String::new(),
            content: BookContent::Text(content.into()),
            price: None,
            is_user_book: false,
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Price to charge; a missing price is free
    pub fn effective_price(&self) -> Price {
        self.price.unwrap_or(Price::FREE)
    }

    pub fn is_epub(&self) -> bool {
        matches!(
            self.content,
            BookContent::EpubUrl(_) | BookContent::Epub(_)
        )
    }

    /// Plain-text content, if this book is read with the spread reader
    pub fn plain_text(&self) -> Option<&str> {
        match &self.content {
            BookContent::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
