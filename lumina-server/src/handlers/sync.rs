//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Event name and JSON payload for a server event
fn event_payload(event: ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::BookUploaded {
            publisher,
            id,
            title,
        } => (
            "book_uploaded",
            serde_json::json!({ "publisher": publisher, "id": id, "title": title }).to_string(),
        ),
        ServerEvent::BookPurchased { publisher, id } => (
            "book_purchased",
            serde_json::json!({ "publisher": publisher, "id": id }).to_string(),
        ),
        ServerEvent::GiftSent { book_id, recipient } => (
            "gift_sent",
            serde_json::json!({ "book_id": book_id, "recipient": recipient }).to_string(),
        ),
        ServerEvent::Notification { announcement } => (
            "notification",
            serde_json::to_string(&announcement).unwrap_or_default(),
        ),
        ServerEvent::Error { message } => (
            "error",
            serde_json::json!({ "message": message }).to_string(),
        ),
    }
}

/// SSE endpoint for real-time updates
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = event_payload(event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
