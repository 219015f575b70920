//! Lumina Core Library
//!
//! This crate provides the core types and logic for the Lumina ebook storefront and reader.
//! Plain-text books are parsed into segments, packed into pages and read two pages at a
//! time through a spread navigator. Storefront state is kept in a key-value store.

pub mod error;
pub mod reader;
pub mod store;
pub mod storefront;
pub mod types;

pub use error::{LuminaError, ReaderError, Result, StoreError, StorefrontError};
pub use reader::{paginate, parse, ReaderSession, SpreadNavigator, DEFAULT_PAGE_CHAR_BUDGET};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use storefront::{Catalog, Publisher, Storefront};
pub use types::{Book, BookContent, Page, PaymentMethod, Points, Price, Segment, Theme};
