use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::middleware::error::ApiResult,
    database::Database,
    models::{FoodItem, FoodQuery},
};

const FOOD_COLUMNS: &str = "id, title, category, quantity, expiry_date, description, image_url, \
                            owner_email, added_at, expiry_notification_sent, expired_notification_sent";

fn food_from_row(row: &AnyRow) -> ApiResult<FoodItem> {
    let expiry_sent: i32 = row.try_get("expiry_notification_sent")?;
    let expired_sent: i32 = row.try_get("expired_notification_sent")?;

    Ok(FoodItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        quantity: row.try_get("quantity")?,
        expiry_date: row.try_get("expiry_date")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        owner_email: row.try_get("owner_email")?,
        added_at: row.try_get("added_at")?,
        liked_by: Vec::new(),
        expiry_notification_sent: expiry_sent != 0,
        expired_notification_sent: expired_sent != 0,
    })
}

impl Database {
    pub async fn create_food(&self, food: &FoodItem) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO foods (id, title, category, quantity, expiry_date, description, image_url,
                                owner_email, added_at, expiry_notification_sent, expired_notification_sent)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&food.id)
        .bind(&food.title)
        .bind(&food.category)
        .bind(food.quantity)
        .bind(&food.expiry_date)
        .bind(&food.description)
        .bind(&food.image_url)
        .bind(&food.owner_email)
        .bind(&food.added_at)
        .bind(if food.expiry_notification_sent { 1 } else { 0 })
        .bind(if food.expired_notification_sent { 1 } else { 0 })
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_food_by_id(&self, id: &str) -> ApiResult<Option<FoodItem>> {
        let row = sqlx::query(&format!("SELECT {} FROM foods WHERE id = ?", FOOD_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            let mut food = food_from_row(&row)?;
            food.liked_by = self.get_food_likers(&food.id).await?;
            Ok(Some(food))
        } else {
            Ok(None)
        }
    }

    pub async fn list_foods(&self, query: &FoodQuery) -> ApiResult<Vec<FoodItem>> {
        let mut sql = format!("SELECT {} FROM foods WHERE 1 = 1", FOOD_COLUMNS);
        if query.title_contains.is_some() {
            sql.push_str(" AND LOWER(title) LIKE ?");
        }
        if query.owner_email.is_some() {
            sql.push_str(" AND owner_email = ?");
        }
        sql.push_str(" ORDER BY added_at DESC");

        let mut q = sqlx::query(&sql);
        if let Some(title) = &query.title_contains {
            q = q.bind(format!("%{}%", title.to_lowercase()));
        }
        if let Some(owner) = &query.owner_email {
            q = q.bind(owner);
        }

        let rows = q.fetch_all(&self.pool).await?;
        self.foods_with_likers(rows).await
    }

    /// Fresh items with the nearest expiry first, for the front page
    pub async fn list_fresh_soonest(&self, now: &str, limit: i64) -> ApiResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM foods WHERE expiry_date > ? ORDER BY expiry_date ASC LIMIT ?",
            FOOD_COLUMNS
        ))
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.foods_with_likers(rows).await
    }

    pub async fn list_expired(&self, now: &str) -> ApiResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM foods WHERE expiry_date < ? ORDER BY expiry_date DESC",
            FOOD_COLUMNS
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        self.foods_with_likers(rows).await
    }

    pub async fn list_expiring_between(&self, from: &str, until: &str) -> ApiResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM foods WHERE expiry_date >= ? AND expiry_date <= ? ORDER BY expiry_date ASC",
            FOOD_COLUMNS
        ))
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        self.foods_with_likers(rows).await
    }

    /// Items inside the lookahead window whose expiring-soon notification has
    /// not been emitted yet
    pub async fn find_expiring_unnotified(&self, now: &str, until: &str) -> ApiResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM foods
             WHERE expiry_date >= ? AND expiry_date <= ? AND expiry_notification_sent = 0",
            FOOD_COLUMNS
        ))
        .bind(now)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        self.foods_with_likers(rows).await
    }

    /// Items past their expiry whose expired notification has not been
    /// emitted yet
    pub async fn find_expired_unnotified(&self, now: &str) -> ApiResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM foods WHERE expiry_date < ? AND expired_notification_sent = 0",
            FOOD_COLUMNS
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        self.foods_with_likers(rows).await
    }

    pub async fn mark_expiry_notified(&self, id: &str) -> ApiResult<()> {
        sqlx::query("UPDATE foods SET expiry_notification_sent = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn mark_expired_notified(&self, id: &str) -> ApiResult<()> {
        sqlx::query("UPDATE foods SET expired_notification_sent = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_food(&self, food: &FoodItem) -> ApiResult<()> {
        sqlx::query(
            "UPDATE foods
             SET title = ?, category = ?, quantity = ?, expiry_date = ?, description = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&food.title)
        .bind(&food.category)
        .bind(food.quantity)
        .bind(&food.expiry_date)
        .bind(&food.description)
        .bind(&food.image_url)
        .bind(&food.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_food(&self, id: &str) -> ApiResult<u64> {
        let result = sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_food_by_title_and_owner(
        &self,
        title: &str,
        owner_email: &str,
    ) -> ApiResult<Option<FoodItem>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM foods WHERE title = ? AND owner_email = ?",
            FOOD_COLUMNS
        ))
        .bind(title)
        .bind(owner_email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let mut food = food_from_row(&row)?;
            food.liked_by = self.get_food_likers(&food.id).await?;
            Ok(Some(food))
        } else {
            Ok(None)
        }
    }

    // Like-set operations. INSERT OR IGNORE / DELETE give set semantics at
    // the store, so concurrent same-direction toggles collapse harmlessly.

    pub async fn add_food_like(&self, food_id: &str, user_email: &str) -> ApiResult<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO food_likes (food_id, user_email) VALUES (?, ?)")
            .bind(food_id)
            .bind(user_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_food_like(&self, food_id: &str, user_email: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM food_likes WHERE food_id = ? AND user_email = ?")
            .bind(food_id)
            .bind(user_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_food_likes(&self, food_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM food_likes WHERE food_id = ?")
            .bind(food_id)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn get_food_likers(&self, food_id: &str) -> ApiResult<Vec<String>> {
        let rows = sqlx::query("SELECT user_email FROM food_likes WHERE food_id = ?")
            .bind(food_id)
            .fetch_all(&self.pool)
            .await?;

        let mut likers = Vec::with_capacity(rows.len());
        for row in rows {
            likers.push(row.try_get("user_email")?);
        }

        Ok(likers)
    }

    async fn foods_with_likers(&self, rows: Vec<AnyRow>) -> ApiResult<Vec<FoodItem>> {
        let mut foods = Vec::with_capacity(rows.len());
        for row in rows {
            let mut food = food_from_row(&row)?;
            food.liked_by = self.get_food_likers(&food.id).await?;
            foods.push(food);
        }

        Ok(foods)
    }
}
