use crate::{
    api::middleware::error::{ApiError, ApiResult},
    database::Database,
    models::{NotificationKind, Review},
    services::NotificationService,
};

#[derive(Clone)]
pub struct ReviewService {
    db: Database,
    notifications: NotificationService,
}

impl ReviewService {
    pub fn new(db: Database, notifications: NotificationService) -> Self {
        Self { db, notifications }
    }

    /// Create a review. Only the owner of record of a food item with this
    /// title may review it.
    pub async fn create_review(
        &self,
        acting_user: &str,
        food_title: &str,
        content: &str,
    ) -> ApiResult<Review> {
        if food_title.trim().is_empty() {
            return Err(ApiError::BadRequest("food title is required".to_string()));
        }
        if content.trim().is_empty() {
            return Err(ApiError::BadRequest("content is required".to_string()));
        }

        let food = self
            .db
            .find_food_by_title_and_owner(food_title, acting_user)
            .await?
            .ok_or_else(|| {
                ApiError::Forbidden("You can only add notes to items you added".to_string())
            })?;

        let review = Review::new(
            food_title.to_string(),
            acting_user.to_string(),
            content.to_string(),
        );
        self.db.create_review(&review).await?;

        self.notifications
            .emit(
                acting_user,
                NotificationKind::ReviewAdded,
                format!("You added a review for \"{}\"", food_title),
                Some(food.id.clone()),
                Some(food.title.clone()),
                Some(acting_user.to_string()),
            )
            .await;

        Ok(review)
    }

    pub async fn list_reviews(&self, food_title: Option<&str>) -> ApiResult<Vec<Review>> {
        self.db.list_reviews(food_title).await
    }
}
