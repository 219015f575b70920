//! Publisher storefront: library, purchases, gifts, uploads and announcements
//!
//! All reader state lives in a [`KeyValueStore`]. Library and purchase state
//! is scoped per publisher; points, gifts and announcement bookkeeping are
//! shared across publishers.
//!
//! Every read-modify-write runs under one storefront-wide lock, so concurrent
//! purchases never lose an update. Records are written before the points
//! balance, and the record is restored if the balance write fails.

mod auth;
mod catalog;
mod upload;

pub use auth::{login, Credentials, User};
pub use catalog::{Catalog, Publisher};
pub use upload::{ingest_upload, UploadKind, SUPPORTED_EXTENSIONS};

use crate::error::{Result, StorefrontError};
use crate::store::{load_json, save_json, KeyValueStore};
use crate::types::{Announcement, AnnouncementKind, Book, Gift, PaymentMethod, Points, Price};
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Loose `name@host.tld` check
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

const POINTS_KEY: &str = "user-points";
const GIFTS_KEY: &str = "user-gifts";
const PUSHED_KEY: &str = "pushed-notification-ids";
const DISMISSED_KEY: &str = "dismissed-announcements";

fn uploads_key(publisher: &str) -> String {
    format!("user-uploaded-books-{}", publisher)
}

fn purchased_key(publisher: &str) -> String {
    format!("purchased-book-ids-{}", publisher)
}

fn epub_location_key(book_id: &str) -> String {
    format!("epub-location:{}", book_id)
}

/// Outcome of a purchase
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Receipt {
    pub book_id: String,
    pub method: PaymentMethod,
    /// Amount charged; zero when the book was already owned
    pub charged: Price,
    /// Points added (positive) or spent (negative)
    pub points_delta: i64,
    pub balance: Points,
    pub already_owned: bool,
}

/// Gift order details
#[derive(Debug, Clone)]
pub struct GiftOrder {
    pub recipient_email: String,
    pub message: String,
    pub method: PaymentMethod,
}

/// Announcements not yet dismissed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnnouncementFeed {
    pub popup: Option<Announcement>,
    pub notifications: Vec<Announcement>,
}

/// Storefront operations over a catalog and a key-value store
#[derive(Clone)]
pub struct Storefront {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    /// Held across every read-modify-write of the store
    write_lock: Arc<Mutex<()>>,
}

/// Points balance after a payment, not yet saved
struct Settlement {
    balance: Points,
    delta: i64,
}

impl Storefront {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn publisher(&self, key: &str) -> std::result::Result<&Publisher, StorefrontError> {
        self.catalog
            .publisher(key)
            .ok_or_else(|| StorefrontError::UnknownPublisher(key.to_string()))
    }

    /// Ids of purchased catalog books. Starts with the publisher's free book.
    pub async fn purchased_ids(&self, publisher: &str) -> Result<Vec<String>> {
        let publisher = self.publisher(publisher)?;
        let stored: Option<Vec<String>> =
            load_json(self.store.as_ref(), &purchased_key(publisher.key())).await?;
        Ok(stored.unwrap_or_else(|| {
            publisher
                .starter_book()
                .map(|b| vec![b.id.clone()])
                .unwrap_or_default()
        }))
    }

    pub async fn user_books(&self, publisher: &str) -> Result<Vec<Book>> {
        let publisher = self.publisher(publisher)?;
        let books: Option<Vec<Book>> =
            load_json(self.store.as_ref(), &uploads_key(publisher.key())).await?;
        Ok(books.unwrap_or_default())
    }

    /// Uploads plus purchased catalog books, sorted by title
    pub async fn library_books(&self, publisher: &str) -> Result<Vec<Book>> {
        let purchased = self.purchased_ids(publisher).await?;
        let mut books = self.user_books(publisher).await?;
        books.extend(
            self.publisher(publisher)?
                .books
                .iter()
                .filter(|b| purchased.contains(&b.id))
                .cloned(),
        );
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    /// Catalog books not yet purchased
    pub async fn store_books(&self, publisher: &str) -> Result<Vec<Book>> {
        let purchased = self.purchased_ids(publisher).await?;
        Ok(self
            .publisher(publisher)?
            .books
            .iter()
            .filter(|b| !purchased.contains(&b.id))
            .cloned()
            .collect())
    }

    /// A catalog book or one of the user's uploads
    pub async fn find_book(&self, publisher: &str, book_id: &str) -> Result<Book> {
        if let Some(book) = self.publisher(publisher)?.book(book_id) {
            return Ok(book.clone());
        }
        self.user_books(publisher)
            .await?
            .into_iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| StorefrontError::UnknownBook(book_id.to_string()).into())
    }

    /// A book the user may read: an upload or a purchased catalog book
    pub async fn library_book(&self, publisher: &str, book_id: &str) -> Result<Book> {
        self.library_books(publisher)
            .await?
            .into_iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| StorefrontError::UnknownBook(book_id.to_string()).into())
    }

    fn catalog_book(&self, publisher: &str, book_id: &str) -> Result<Book> {
        self.publisher(publisher)?
            .book(book_id)
            .cloned()
            .ok_or_else(|| StorefrontError::UnknownBook(book_id.to_string()).into())
    }

    pub async fn points(&self) -> Result<Points> {
        let points: Option<Points> = load_json(self.store.as_ref(), POINTS_KEY).await?;
        Ok(points.unwrap_or(Points::STARTING_BALANCE))
    }

    /// Gifts sent, newest first
    pub async fn gifts(&self) -> Result<Vec<Gift>> {
        let gifts: Option<Vec<Gift>> = load_json(self.store.as_ref(), GIFTS_KEY).await?;
        Ok(gifts.unwrap_or_default())
    }

    /// Balance after paying `price`. Nothing is written.
    async fn settle(&self, price: Price, method: PaymentMethod) -> Result<Settlement> {
        let balance = self.points().await?;
        if method.earns_points() {
            let reward = price.reward();
            return Ok(Settlement {
                balance: balance.earn(reward),
                delta: reward.hundredths(),
            });
        }

        let updated = balance
            .spend(price)
            .ok_or(StorefrontError::InsufficientPoints { balance, price })?;
        Ok(Settlement {
            balance: updated,
            delta: updated.hundredths() - balance.hundredths(),
        })
    }

    /// Save `record` under `key`, then the settled balance. If the balance
    /// cannot be saved, `previous` is written back under `key`.
    async fn commit<T: Serialize>(
        &self,
        key: &str,
        record: &T,
        previous: &T,
        settlement: &Settlement,
    ) -> Result<()> {
        save_json(self.store.as_ref(), key, record).await?;

        if let Err(e) = save_json(self.store.as_ref(), POINTS_KEY, &settlement.balance).await {
            if let Err(restore) = save_json(self.store.as_ref(), key, previous).await {
                tracing::error!(
                    key,
                    error = %restore,
                    "failed to restore record after points write failed"
                );
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Buy a catalog book. Buying an owned book charges nothing.
    pub async fn purchase(
        &self,
        publisher: &str,
        book_id: &str,
        method: PaymentMethod,
    ) -> Result<Receipt> {
        let book = self.catalog_book(publisher, book_id)?;
        let _guard = self.write_lock.lock().await;
        let previous = self.purchased_ids(publisher).await?;
        let mut purchased = previous.clone();

        if purchased.contains(&book.id) {
            return Ok(Receipt {
                book_id: book.id,
                method,
                charged: Price::FREE,
                points_delta: 0,
                balance: self.points().await?,
                already_owned: true,
            });
        }

        let price = book.effective_price();
        let settlement = self.settle(price, method).await?;

        purchased.push(book.id.clone());
        self.commit(&purchased_key(publisher), &purchased, &previous, &settlement)
            .await?;

        let balance = settlement.balance;
        tracing::info!(publisher, book_id = %book.id, ?method, %price, %balance, "purchased book");

        Ok(Receipt {
            book_id: book.id,
            method,
            charged: price,
            points_delta: settlement.delta,
            balance,
            already_owned: false,
        })
    }

    /// Send a catalog book to someone else. The buyer's library is unchanged.
    pub async fn gift(&self, publisher: &str, book_id: &str, order: GiftOrder) -> Result<Gift> {
        let book = self.catalog_book(publisher, book_id)?;
        let recipient = order.recipient_email.trim();
        if !EMAIL_RE.is_match(recipient) {
            return Err(StorefrontError::InvalidRecipient(order.recipient_email).into());
        }

        let _guard = self.write_lock.lock().await;
        let settlement = self.settle(book.effective_price(), order.method).await?;

        let gift = Gift {
            id: Uuid::new_v4(),
            book_id: book.id,
            recipient_email: recipient.to_string(),
            message: order.message,
            date: chrono::Utc::now(),
        };

        let previous = self.gifts().await?;
        let mut gifts = previous.clone();
        gifts.insert(0, gift.clone());
        self.commit(GIFTS_KEY, &gifts, &previous, &settlement).await?;

        tracing::info!(publisher, book_id = %gift.book_id, recipient = %gift.recipient_email, "sent gift");
        Ok(gift)
    }

    /// Add an uploaded file to the publisher-scoped library, newest first
    pub async fn upload(&self, publisher: &str, filename: &str, data: &[u8]) -> Result<Book> {
        let publisher = self.publisher(publisher)?.key();
        let book = ingest_upload(filename, data)?;

        let _guard = self.write_lock.lock().await;
        let mut books = self.user_books(publisher).await?;
        books.insert(0, book.clone());
        save_json(self.store.as_ref(), &uploads_key(publisher), &books).await?;

        Ok(book)
    }

    async fn dismissed(&self) -> Result<Vec<String>> {
        let dismissed: Option<Vec<String>> =
            load_json(self.store.as_ref(), DISMISSED_KEY).await?;
        Ok(dismissed.unwrap_or_default())
    }

    /// Active announcements: the first popup and every notification
    pub async fn announcements(&self, publisher: &str) -> Result<AnnouncementFeed> {
        let dismissed = self.dismissed().await?;
        let active: Vec<&Announcement> = self
            .publisher(publisher)?
            .announcements
            .iter()
            .filter(|a| !dismissed.contains(&a.id))
            .collect();

        Ok(AnnouncementFeed {
            popup: active
                .iter()
                .find(|a| a.kind == AnnouncementKind::Popup)
                .map(|a| (*a).clone()),
            notifications: active
                .iter()
                .filter(|a| a.kind == AnnouncementKind::Notification)
                .map(|a| (*a).clone())
                .collect(),
        })
    }

    pub async fn dismiss_announcement(&self, announcement_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut dismissed = self.dismissed().await?;
        if !dismissed.iter().any(|id| id == announcement_id) {
            dismissed.push(announcement_id.to_string());
            save_json(self.store.as_ref(), DISMISSED_KEY, &dismissed).await?;
        }
        Ok(())
    }

    /// Mark every never-pushed announcement as pushed and return the first one.
    ///
    /// Only one notification is shown per call so a returning reader is not
    /// flooded; the rest are considered delivered.
    pub async fn take_pending_push(&self, publisher: &str) -> Result<Option<Announcement>> {
        let publisher = self.publisher(publisher)?;
        let _guard = self.write_lock.lock().await;
        let mut pushed: Vec<String> = load_json(self.store.as_ref(), PUSHED_KEY)
            .await?
            .unwrap_or_default();

        let pending: Vec<&Announcement> = publisher
            .announcements
            .iter()
            .filter(|a| a.requires_push && !pushed.contains(&a.id))
            .collect();

        let Some(first) = pending.first().map(|a| (*a).clone()) else {
            return Ok(None);
        };

        pushed.extend(pending.iter().map(|a| a.id.clone()));
        save_json(self.store.as_ref(), PUSHED_KEY, &pushed).await?;
        Ok(Some(first))
    }

    /// Opaque EPUB engine locator saved for a book
    pub async fn epub_location(&self, book_id: &str) -> Result<Option<String>> {
        Ok(load_json(self.store.as_ref(), &epub_location_key(book_id)).await?)
    }

    pub async fn set_epub_location(&self, book_id: &str, locator: &str) -> Result<()> {
        save_json(self.store.as_ref(), &epub_location_key(book_id), locator).await?;
        Ok(())
    }
}
