//! Turning uploaded files into library books

use crate::error::StorefrontError;
use crate::types::{Book, BookContent, UNKNOWN_AUTHOR};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::Cursor;
use std::path::Path;
use uuid::Uuid;

/// File extensions accepted for upload
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "epub"];

/// Kind of an accepted upload, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    PlainText,
    Markdown,
    Epub,
}

impl UploadKind {
    /// Kind for a file name, matched case-insensitively on the last extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();
        match ext.as_str() {
            "txt" => Some(UploadKind::PlainText),
            "md" => Some(UploadKind::Markdown),
            "epub" => Some(UploadKind::Epub),
            _ => None,
        }
    }
}

/// Build a user book from an uploaded file.
///
/// Text and markdown are kept as raw text for the spread reader. EPUBs keep
/// their bytes for the EPUB engine; only title, creator and cover are read.
pub fn ingest_upload(filename: &str, data: &[u8]) -> Result<Book, StorefrontError> {
    let kind = UploadKind::from_filename(filename)
        .ok_or_else(|| StorefrontError::UnsupportedUpload(filename.to_string()))?;
    let stem = file_stem(filename);

    let book = match kind {
        UploadKind::PlainText | UploadKind::Markdown => Book {
            id: Uuid::new_v4().to_string(),
            title: stem,
            author: UNKNOWN_AUTHOR.to_string(),
            cover_url: placeholder_cover(),
            content: BookContent::Text(String::from_utf8_lossy(data).into_owned()),
            price: None,
            is_user_book: true,
        },
        UploadKind::Epub => ingest_epub(&stem, data)?,
    };

    tracing::info!(filename, id = %book.id, title = %book.title, "ingested upload");
    Ok(book)
}

fn ingest_epub(stem: &str, data: &[u8]) -> Result<Book, StorefrontError> {
    if data.is_empty() {
        return Err(StorefrontError::EmptyUpload(stem.to_string()));
    }

    let cursor = Cursor::new(data.to_vec());
    let mut doc = epub::doc::EpubDoc::from_reader(cursor)
        .map_err(|e| StorefrontError::InvalidEpub(e.to_string()))?;

    let get_meta = |key: &str| -> Option<String> {
        doc.mdata(key)
            .map(|item| item.value.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let title = get_meta("title").unwrap_or_else(|| stem.to_string());
    let author = get_meta("creator").unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let cover_url = match doc.get_cover() {
        Some((bytes, mime)) => format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        None => {
            tracing::warn!(title = %title, "EPUB has no cover, using placeholder");
            placeholder_cover()
        }
    };

    Ok(Book {
        id: Uuid::new_v4().to_string(),
        title,
        author,
        cover_url,
        content: BookContent::Epub(data.to_vec()),
        price: None,
        is_user_book: true,
    })
}

/// File name without its last extension
fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

fn placeholder_cover() -> String {
    format!("https://picsum.photos/seed/{}/400/600", Uuid::new_v4())
}
