use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::middleware::error::ApiResult,
    database::Database,
    models::{Notification, NotificationKind},
};

fn notification_from_row(row: &AnyRow) -> ApiResult<Notification> {
    let kind: String = row.try_get("kind")?;
    let is_read: i32 = row.try_get("is_read")?;

    Ok(Notification {
        id: row.try_get("id")?,
        owner_email: row.try_get("owner_email")?,
        kind: NotificationKind::from(kind),
        message: row.try_get("message")?,
        food_id: row.try_get("food_id").ok(),
        food_title: row.try_get("food_title").ok(),
        related_user: row.try_get("related_user").ok(),
        read: is_read != 0,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    pub async fn create_notification(&self, notification: &Notification) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, owner_email, kind, message, food_id, food_title, related_user, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.owner_email)
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(&notification.food_id)
        .bind(&notification.food_title)
        .bind(&notification.related_user)
        .bind(if notification.read { 1 } else { 0 })
        .bind(&notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_notification_by_id(&self, id: &str) -> ApiResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, owner_email, kind, message, food_id, food_title, related_user, is_read, created_at
             FROM notifications
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(notification_from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list_notifications(
        &self,
        owner_email: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, owner_email, kind, message, food_id, food_title, related_user, is_read, created_at
             FROM notifications
             WHERE owner_email = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?",
        )
        .bind(owner_email)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in rows {
            notifications.push(notification_from_row(&row)?);
        }

        Ok(notifications)
    }

    pub async fn count_unread_notifications(&self, owner_email: &str) -> ApiResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM notifications WHERE owner_email = ? AND is_read = 0",
        )
        .bind(owner_email)
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn mark_notification_read(&self, id: &str) -> ApiResult<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn mark_all_notifications_read(&self, owner_email: &str) -> ApiResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = 1 WHERE owner_email = ? AND is_read = 0")
                .bind(owner_email)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_notification(&self, id: &str) -> ApiResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_all_notifications(&self, owner_email: &str) -> ApiResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE owner_email = ?")
            .bind(owner_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
