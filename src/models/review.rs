use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review entity: a free-text note attached to a food item by its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub food_title: String,
    pub owner_email: String,
    pub content: String,
    pub posted_at: String,
}

impl Review {
    pub fn new(food_title: String, owner_email: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            food_title,
            owner_email,
            content,
            posted_at: Utc::now().to_rfc3339(),
        }
    }
}
