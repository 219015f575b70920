//! Error types for Lumina Core

use crate::types::{Points, Price};
use thiserror::Error;

/// Result type alias using LuminaError
pub type Result<T> = std::result::Result<T, LuminaError>;

/// Top-level error type for all Lumina operations
#[derive(Debug, Error)]
pub enum LuminaError {
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    #[error("Storefront error: {0}")]
    Storefront(#[from] StorefrontError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the plain-text reader
///
/// Book content never produces one of these; they only signal a contract
/// violation by the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Invalid argument: page character budget must be positive, got {0}")]
    InvalidArgument(i64),

    #[error("Book {0} is an EPUB and is rendered by the EPUB engine, not the spread reader")]
    NotPlainText(String),
}

/// Errors that occur in storefront operations
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Unknown publisher: {0}")]
    UnknownPublisher(String),

    #[error("Unknown book: {0}")]
    UnknownBook(String),

    #[error("Not enough points: balance {balance}, price {price}")]
    InsufficientPoints { balance: Points, price: Price },

    #[error("Invalid recipient email: {0}")]
    InvalidRecipient(String),

    #[error("Unsupported upload: {0} (expected .txt, .md or .epub)")]
    UnsupportedUpload(String),

    #[error("Upload is empty or could not be read: {0}")]
    EmptyUpload(String),

    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),
}

/// Errors that occur during key-value store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
