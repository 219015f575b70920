//! Core types shared by the reader and the storefront

mod announcement;
mod book;
mod money;
mod page;
mod segment;
mod theme;

pub use announcement::{Announcement, AnnouncementKind, Gift, PaymentMethod};
pub use book::{Book, BookContent, UNKNOWN_AUTHOR};
pub use money::{ParsePriceError, Points, Price, POINTS_EARN_PERCENT};
pub use page::Page;
pub use segment::Segment;
pub use theme::{Palette, Theme, ThemeColors, SHADES};
