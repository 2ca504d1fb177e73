use chrono::{Duration, Utc};
use larder::database::Database;
use larder::models::FoodItem;
use larder::services::{
    ExpiryScanner, FoodService, NotificationService, ReviewService,
};

pub fn notification_service(db: &Database) -> NotificationService {
    NotificationService::new(db.clone())
}

pub fn food_service(db: &Database) -> FoodService {
    FoodService::new(db.clone(), notification_service(db))
}

pub fn review_service(db: &Database) -> ReviewService {
    ReviewService::new(db.clone(), notification_service(db))
}

pub fn expiry_scanner(db: &Database, lookahead_days: i64) -> ExpiryScanner {
    ExpiryScanner::new(db.clone(), notification_service(db), lookahead_days)
}

/// Insert a food item expiring `expires_in_hours` from now
pub async fn create_test_food(
    db: &Database,
    owner: &str,
    title: &str,
    expires_in_hours: i64,
) -> FoodItem {
    let expiry = (Utc::now() + Duration::hours(expires_in_hours)).to_rfc3339();
    create_test_food_at(db, owner, title, &expiry).await
}

/// Insert a food item with an explicit expiry timestamp
pub async fn create_test_food_at(
    db: &Database,
    owner: &str,
    title: &str,
    expiry: &str,
) -> FoodItem {
    let food = FoodItem::new(
        title.to_string(),
        "Other".to_string(),
        1,
        expiry.to_string(),
        String::new(),
        String::new(),
        owner.to_string(),
    );
    db.create_food(&food).await.expect("Failed to insert test food");
    food
}
