use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification kind representing what triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FoodAdded,
    FoodRemoved,
    FoodLiked,
    ReviewAdded,
    ExpirySoon,
    ExpiryToday,
    Expired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::FoodAdded => "food_added",
            NotificationKind::FoodRemoved => "food_removed",
            NotificationKind::FoodLiked => "food_liked",
            NotificationKind::ReviewAdded => "review_added",
            NotificationKind::ExpirySoon => "expiry_soon",
            NotificationKind::ExpiryToday => "expiry_today",
            NotificationKind::Expired => "expired",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for NotificationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "food_added" => NotificationKind::FoodAdded,
            "food_removed" => NotificationKind::FoodRemoved,
            "food_liked" => NotificationKind::FoodLiked,
            "review_added" => NotificationKind::ReviewAdded,
            "expiry_soon" => NotificationKind::ExpirySoon,
            "expiry_today" => NotificationKind::ExpiryToday,
            "expired" => NotificationKind::Expired,
            _ => NotificationKind::FoodAdded, // Default fallback
        }
    }
}

/// Notification entity delivered to a user's feed. Immutable after creation
/// except for the read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub owner_email: String,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_title: Option<String>,
    /// The user whose action triggered this notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_user: Option<String>,
    pub read: bool,
    pub created_at: String,
}

impl Notification {
    pub fn new(
        owner_email: String,
        kind: NotificationKind,
        message: String,
        food_id: Option<String>,
        food_title: Option<String>,
        related_user: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_email,
            kind,
            message,
            food_id,
            food_title,
            related_user,
            read: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Message and kind for an item expiring in `days_until_expiry` days.
///
/// Day zero means the expiry instant falls before the end of the current day.
pub fn expiry_message(title: &str, days_until_expiry: i64) -> (NotificationKind, String) {
    match days_until_expiry {
        0 => (
            NotificationKind::ExpiryToday,
            format!("\"{}\" expires today! Use it soon.", title),
        ),
        1 => (
            NotificationKind::ExpirySoon,
            format!("\"{}\" expires tomorrow!", title),
        ),
        n => (
            NotificationKind::ExpirySoon,
            format!("\"{}\" expires in {} days.", title, n),
        ),
    }
}

/// Message for an item whose expiry instant has passed.
pub fn expired_message(title: &str) -> String {
    format!("\"{}\" has expired! Consider discarding it.", title)
}
