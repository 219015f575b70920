//! Storefront handlers: publishers, library, store, purchases and announcements

use super::{api_error, require_user, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lumina_core::storefront::{AnnouncementFeed, GiftOrder, Receipt, User};
use lumina_core::types::{Book, Gift, PaymentMethod, Points, Price, Theme};
use serde::{Deserialize, Serialize};

/// List all publisher themes
pub async fn list_publishers(State(state): State<AppState>) -> Json<Vec<Theme>> {
    Json(state.storefront.catalog().themes().cloned().collect())
}

/// Get one publisher's theme
pub async fn get_publisher(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
) -> Result<Json<Theme>, ApiError> {
    let publisher = state.storefront.publisher(&publisher).map_err(api_error)?;
    Ok(Json(publisher.theme.clone()))
}

/// Book summary for list responses
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub price: Option<Price>,
    pub is_user_book: bool,
    pub is_epub: bool,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            cover_url: book.cover_url.clone(),
            price: book.price,
            is_user_book: book.is_user_book,
            is_epub: book.is_epub(),
        }
    }
}

/// List response
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<BookSummary>,
    pub total: usize,
}

impl From<Vec<Book>> for BooksResponse {
    fn from(books: Vec<Book>) -> Self {
        let books: Vec<BookSummary> = books.iter().map(BookSummary::from).collect();
        Self {
            total: books.len(),
            books,
        }
    }
}

/// Publisher books not yet purchased
pub async fn store_books(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
) -> Result<Json<BooksResponse>, ApiError> {
    require_user(&state).await?;
    let books = state
        .storefront
        .store_books(&publisher)
        .await
        .map_err(api_error)?;
    Ok(Json(books.into()))
}

/// Uploads plus purchased books, sorted by title
pub async fn library_books(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
) -> Result<Json<BooksResponse>, ApiError> {
    require_user(&state).await?;
    let books = state
        .storefront
        .library_books(&publisher)
        .await
        .map_err(api_error)?;
    Ok(Json(books.into()))
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub book: BookSummary,
    pub message: String,
}

/// Upload a `.txt`, `.md` or `.epub` file into the library
pub async fn upload_book(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    require_user(&state).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let book = match state.storefront.upload(&publisher, &filename, &data).await {
            Ok(book) => book,
            Err(e) => {
                state.broadcast(ServerEvent::Error {
                    message: format!("Upload of {} failed: {}", filename, e),
                });
                return Err(api_error(e));
            }
        };

        state.broadcast(ServerEvent::BookUploaded {
            publisher: publisher.clone(),
            id: book.id.clone(),
            title: book.title.clone(),
        });

        return Ok(Json(UploadResponse {
            book: BookSummary::from(&book),
            message: "Book uploaded successfully".to_string(),
        }));
    }

    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

/// Purchase request body
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub method: PaymentMethod,
}

/// Buy a catalog book
pub async fn purchase_book(
    State(state): State<AppState>,
    Path((publisher, id)): Path<(String, String)>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<Receipt>, ApiError> {
    require_user(&state).await?;
    let receipt = state
        .storefront
        .purchase(&publisher, &id, request.method)
        .await
        .map_err(api_error)?;

    if !receipt.already_owned {
        state.broadcast(ServerEvent::BookPurchased {
            publisher,
            id: receipt.book_id.clone(),
        });
    }
    Ok(Json(receipt))
}

/// Gift request body
#[derive(Debug, Deserialize)]
pub struct GiftRequest {
    pub recipient_email: String,
    #[serde(default)]
    pub message: String,
    pub method: PaymentMethod,
}

/// Send a catalog book to someone else
pub async fn gift_book(
    State(state): State<AppState>,
    Path((publisher, id)): Path<(String, String)>,
    Json(request): Json<GiftRequest>,
) -> Result<Json<Gift>, ApiError> {
    require_user(&state).await?;
    let gift = state
        .storefront
        .gift(
            &publisher,
            &id,
            GiftOrder {
                recipient_email: request.recipient_email,
                message: request.message,
                method: request.method,
            },
        )
        .await
        .map_err(api_error)?;

    state.broadcast(ServerEvent::GiftSent {
        book_id: gift.book_id.clone(),
        recipient: gift.recipient_email.clone(),
    });
    Ok(Json(gift))
}

/// Active popup and notifications
pub async fn list_announcements(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
) -> Result<Json<AnnouncementFeed>, ApiError> {
    require_user(&state).await?;
    let feed = state
        .storefront
        .announcements(&publisher)
        .await
        .map_err(api_error)?;
    Ok(Json(feed))
}

/// Hide an announcement for good
pub async fn dismiss_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_user(&state).await?;
    state
        .storefront
        .dismiss_announcement(&id)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Account overview
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: User,
    pub points: Points,
    pub gifts: Vec<Gift>,
}

/// Signed-in user with points balance and sent gifts
pub async fn account(State(state): State<AppState>) -> Result<Json<AccountResponse>, ApiError> {
    let user = require_user(&state).await?;
    let points = state.storefront.points().await.map_err(api_error)?;
    let gifts = state.storefront.gifts().await.map_err(api_error)?;
    Ok(Json(AccountResponse {
        user,
        points,
        gifts,
    }))
}
