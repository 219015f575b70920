//! Plain-text reader: marker parsing, pagination and spread navigation
//!
//! Raw text flows one way: [`parse`] turns it into segments, [`paginate`]
//! packs the segments into an even number of pages, and a
//! [`SpreadNavigator`] walks those pages two at a time.

mod navigator;
mod paginate;
mod parser;
mod session;

pub use navigator::{
    Direction, NavigatorState, SpreadNavigator, SpreadRoles, Transition, TurningPage,
};
pub use paginate::{paginate, validate_budget, DEFAULT_PAGE_CHAR_BUDGET};
pub use parser::parse;
pub use session::{ReaderSession, ReaderTheme, SpreadView, TurningView};
