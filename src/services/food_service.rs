use chrono::{DateTime, Duration, Utc};
use email_address::EmailAddress;

use crate::{
    api::middleware::error::{ApiError, ApiResult},
    database::Database,
    models::{FoodItem, FoodQuery, FoodUpdate, NotificationKind},
    services::NotificationService,
};

/// How many soonest-expiring items the front page shows
const FRONT_PAGE_LIMIT: i64 = 6;

/// Browse window for the expiring-soon listing, distinct from the scanner's
/// notification lookahead
const EXPIRING_SOON_BROWSE_DAYS: i64 = 5;

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy)]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Clone)]
pub struct FoodService {
    db: Database,
    notifications: NotificationService,
}

impl FoodService {
    pub fn new(db: Database, notifications: NotificationService) -> Self {
        Self { db, notifications }
    }

    pub async fn create_food(
        &self,
        owner_email: &str,
        title: String,
        category: Option<String>,
        quantity: Option<i64>,
        expiry_date: String,
        description: Option<String>,
        image_url: Option<String>,
    ) -> ApiResult<FoodItem> {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("title is required".to_string()));
        }
        if !EmailAddress::is_valid(owner_email) {
            return Err(ApiError::BadRequest(
                "owner email is not a valid address".to_string(),
            ));
        }
        let expiry_date = parse_timestamp(&expiry_date, "expiry_date")?;
        let quantity = quantity.unwrap_or(1);
        if quantity < 0 {
            return Err(ApiError::BadRequest(
                "quantity must not be negative".to_string(),
            ));
        }

        let food = FoodItem::new(
            title,
            category.unwrap_or_else(|| "Other".to_string()),
            quantity,
            expiry_date,
            description.unwrap_or_default(),
            image_url.unwrap_or_default(),
            owner_email.to_string(),
        );

        self.db.create_food(&food).await?;

        self.notifications
            .emit(
                owner_email,
                NotificationKind::FoodAdded,
                format!("You added \"{}\" to your fridge", food.title),
                Some(food.id.clone()),
                Some(food.title.clone()),
                Some(owner_email.to_string()),
            )
            .await;

        Ok(food)
    }

    pub async fn get_food(&self, id: &str) -> ApiResult<FoodItem> {
        self.db
            .get_food_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Food not found".to_string()))
    }

    pub async fn list_foods(&self, query: &FoodQuery) -> ApiResult<Vec<FoodItem>> {
        self.db.list_foods(query).await
    }

    /// Soonest-expiring fresh items for the front page
    pub async fn front_page(&self) -> ApiResult<Vec<FoodItem>> {
        let now = Utc::now().to_rfc3339();
        self.db.list_fresh_soonest(&now, FRONT_PAGE_LIMIT).await
    }

    pub async fn list_expired(&self) -> ApiResult<Vec<FoodItem>> {
        let now = Utc::now().to_rfc3339();
        self.db.list_expired(&now).await
    }

    pub async fn list_expiring_soon(&self) -> ApiResult<Vec<FoodItem>> {
        let now = Utc::now();
        let until = now + Duration::days(EXPIRING_SOON_BROWSE_DAYS);
        self.db
            .list_expiring_between(&now.to_rfc3339(), &until.to_rfc3339())
            .await
    }

    pub async fn update_food(
        &self,
        id: &str,
        acting_user: &str,
        update: FoodUpdate,
    ) -> ApiResult<FoodItem> {
        let mut food = self.get_food(id).await?;

        if food.owner_email != acting_user {
            return Err(ApiError::Forbidden(
                "Cannot update another user's food item".to_string(),
            ));
        }

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(ApiError::BadRequest("title must not be empty".to_string()));
            }
            food.title = title;
        }
        if let Some(category) = update.category {
            food.category = category;
        }
        if let Some(quantity) = update.quantity {
            if quantity < 0 {
                return Err(ApiError::BadRequest(
                    "quantity must not be negative".to_string(),
                ));
            }
            food.quantity = quantity;
        }
        if let Some(expiry_date) = update.expiry_date {
            food.expiry_date = parse_timestamp(&expiry_date, "expiry_date")?;
        }
        if let Some(description) = update.description {
            food.description = description;
        }
        if let Some(image_url) = update.image_url {
            food.image_url = image_url;
        }

        self.db.update_food(&food).await?;
        Ok(food)
    }

    pub async fn delete_food(&self, id: &str, acting_user: &str) -> ApiResult<()> {
        let food = self.get_food(id).await?;

        if food.owner_email != acting_user {
            return Err(ApiError::Forbidden(
                "Cannot delete another user's food item".to_string(),
            ));
        }

        self.db.delete_food(id).await?;

        self.notifications
            .emit(
                &food.owner_email,
                NotificationKind::FoodRemoved,
                format!("You removed \"{}\" from your fridge", food.title),
                None,
                Some(food.title.clone()),
                Some(food.owner_email.clone()),
            )
            .await;

        Ok(())
    }

    /// Flip the acting user's like on a food item and return the new state.
    ///
    /// The membership read and the mutation are separate steps; concurrent
    /// toggles by the same user resolve by last write on the membership row.
    pub async fn toggle_like(&self, food_id: &str, acting_user: &str) -> ApiResult<LikeOutcome> {
        let food = self.get_food(food_id).await?;

        let already_liked = food.is_liked_by(acting_user);
        if already_liked {
            self.db.remove_food_like(food_id, acting_user).await?;
        } else {
            self.db.add_food_like(food_id, acting_user).await?;
        }

        let likes_count = self.db.count_food_likes(food_id).await?;

        // Every toggle-to-liked by a non-owner notifies the owner again;
        // like/unlike/like cycles are not deduplicated.
        if !already_liked && food.owner_email != acting_user {
            self.notifications
                .emit(
                    &food.owner_email,
                    NotificationKind::FoodLiked,
                    format!("{} liked your \"{}\"", acting_user, food.title),
                    Some(food.id.clone()),
                    Some(food.title.clone()),
                    Some(acting_user.to_string()),
                )
                .await;
        }

        Ok(LikeOutcome {
            liked: !already_liked,
            likes_count,
        })
    }
}

fn parse_timestamp(value: &str, field: &str) -> ApiResult<String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .map_err(|_| ApiError::BadRequest(format!("{} must be an RFC 3339 timestamp", field)))
}
