use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// FoodItem entity representing one tracked item in a household's fridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub quantity: i64,
    /// RFC 3339 timestamp
    pub expiry_date: String,
    pub description: String,
    pub image_url: String,
    pub owner_email: String,
    pub added_at: String,
    /// Emails of users who liked this item (unique, unordered)
    pub liked_by: Vec<String>,
    /// Guards the expiring-soon notification: set once, never cleared
    pub expiry_notification_sent: bool,
    /// Guards the expired notification: set once, never cleared
    pub expired_notification_sent: bool,
}

impl FoodItem {
    pub fn new(
        title: String,
        category: String,
        quantity: i64,
        expiry_date: String,
        description: String,
        image_url: String,
        owner_email: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            category,
            quantity,
            expiry_date,
            description,
            image_url,
            owner_email,
            added_at: Utc::now().to_rfc3339(),
            liked_by: Vec::new(),
            expiry_notification_sent: false,
            expired_notification_sent: false,
        }
    }

    pub fn likes_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, email: &str) -> bool {
        self.liked_by.iter().any(|e| e == email)
    }
}

/// Filter for food listing queries
#[derive(Debug, Clone, Default)]
pub struct FoodQuery {
    /// Case-insensitive substring match on the title
    pub title_contains: Option<String>,
    /// Exact match on the owner
    pub owner_email: Option<String>,
}

/// Partial update applied to an existing food item; absent fields keep
/// their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub expiry_date: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
