//! Publisher announcements and gifts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an announcement is presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    Popup,
    Notification,
}

/// A publisher announcement with a call to action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: AnnouncementKind,

    pub title: String,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub cta_text: String,

    /// Usually a book id in the same publisher's catalog
    pub cta_link: String,

    /// Delivered once as a (simulated) push notification
    #[serde(default)]
    pub requires_push: bool,
}

/// A book sent to someone else
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gift {
    pub id: Uuid,
    pub book_id: String,
    pub recipient_email: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

/// How a purchase or gift is paid for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Fonepay,
    Points,
}

impl PaymentMethod {
    /// Card and fonepay payments earn points; paying with points spends them
    pub fn earns_points(self) -> bool {
        !matches!(self, PaymentMethod::Points)
    }
}
