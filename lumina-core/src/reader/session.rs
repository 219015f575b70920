//! A single open plain-text book

use super::navigator::{Direction, NavigatorState, SpreadNavigator};
use super::{paginate, parse};
use crate::error::ReaderError;
use crate::types::{Book, Page};
use serde::{Deserialize, Serialize};

/// Page colour scheme of the reader
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReaderTheme {
    Light,
    #[default]
    Sepia,
    Dark,
}

/// Pagination result plus navigation state for one reading session.
///
/// Pages are computed once when the session opens and kept until it closes.
/// Reading position is not persisted.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    book_id: String,
    title: String,
    author: String,
    pages: Vec<Page>,
    navigator: SpreadNavigator,
    theme: ReaderTheme,
}

impl ReaderSession {
    /// Open a plain-text book. EPUB books belong to the EPUB engine.
    pub fn open(book: &Book, page_char_budget: i64) -> Result<Self, ReaderError> {
        let text = book
            .plain_text()
            .ok_or_else(|| ReaderError::NotPlainText(book.id.clone()))?;
        Self::from_text(&book.id, &book.title, &book.author, text, page_char_budget)
    }

    /// Open raw text that is not part of any catalog
    pub fn from_text(
        book_id: &str,
        title: &str,
        author: &str,
        text: &str,
        page_char_budget: i64,
    ) -> Result<Self, ReaderError> {
        let pages = paginate(&parse(text), page_char_budget)?;
        tracing::debug!(book_id, pages = pages.len(), "opened reader session");

        Ok(Self {
            book_id: book_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            navigator: SpreadNavigator::open(pages.len()),
            pages,
            theme: ReaderTheme::default(),
        })
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn navigator(&self) -> &SpreadNavigator {
        &self.navigator
    }

    pub fn theme(&self) -> ReaderTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ReaderTheme) {
        self.theme = theme;
    }

    pub fn next(&mut self) -> bool {
        self.navigator.request_next()
    }

    pub fn prev(&mut self) -> bool {
        self.navigator.request_prev()
    }

    pub fn complete_transition(&mut self) -> bool {
        self.navigator.complete_transition()
    }

    /// Page at `index`, or an empty page past either end
    pub fn page(&self, index: usize) -> Page {
        self.pages.get(index).cloned().unwrap_or_default()
    }

    /// Snapshot of everything the presentation layer needs to draw
    pub fn view(&self) -> SpreadView {
        let roles = self.navigator.roles();
        let state = self.navigator.state();

        SpreadView {
            book_id: self.book_id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            total_pages: self.pages.len(),
            state,
            direction: state.transition.map(|t| t.direction),
            left: self.page(roles.static_left),
            right: self.page(roles.static_right),
            turning: roles.turning.map(|t| TurningView {
                front: self.page(t.front),
                back: self.page(t.back),
            }),
            page_label: self.navigator.page_label(),
            progress: self.navigator.progress(),
            theme: self.theme,
        }
    }
}

/// Rendering snapshot of a reader session
#[derive(Debug, Clone, Serialize)]
pub struct SpreadView {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub total_pages: usize,
    pub state: NavigatorState,
    pub direction: Option<Direction>,
    pub left: Page,
    pub right: Page,
    pub turning: Option<TurningView>,
    pub page_label: String,
    pub progress: f64,
    pub theme: ReaderTheme,
}

/// Pages on both faces of the turning page
#[derive(Debug, Clone, Serialize)]
pub struct TurningView {
    pub front: Page,
    pub back: Page,
}
