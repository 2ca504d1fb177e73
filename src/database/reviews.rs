use sqlx::Row;

use crate::{api::middleware::error::ApiResult, database::Database, models::Review};

impl Database {
    pub async fn create_review(&self, review: &Review) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO reviews (id, food_title, owner_email, content, posted_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&review.id)
        .bind(&review.food_title)
        .bind(&review.owner_email)
        .bind(&review.content)
        .bind(&review.posted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_reviews(&self, food_title: Option<&str>) -> ApiResult<Vec<Review>> {
        let rows = if let Some(title) = food_title {
            sqlx::query(
                "SELECT id, food_title, owner_email, content, posted_at
                 FROM reviews
                 WHERE food_title = ?
                 ORDER BY posted_at DESC",
            )
            .bind(title)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(
                "SELECT id, food_title, owner_email, content, posted_at
                 FROM reviews
                 ORDER BY posted_at DESC",
            )
            .fetch_all(&self.pool)
            .await?
        };

        let mut reviews = Vec::with_capacity(rows.len());
        for row in rows {
            reviews.push(Review {
                id: row.try_get("id")?,
                food_title: row.try_get("food_title")?,
                owner_email: row.try_get("owner_email")?,
                content: row.try_get("content")?,
                posted_at: row.try_get("posted_at")?,
            });
        }

        Ok(reviews)
    }
}
