use tracing::warn;

use crate::{
    api::middleware::error::{ApiError, ApiResult},
    database::Database,
    models::{Notification, NotificationKind},
};

/// Creates notifications and serves a user's notification feed.
///
/// Creation through [`emit`](NotificationService::emit) is best-effort: the
/// triggering business operation must succeed even when the notification
/// write fails.
#[derive(Clone)]
pub struct NotificationService {
    db: Database,
}

impl NotificationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a notification for `owner_email` and return its id.
    ///
    /// Returns `None` when the write fails; the error is logged and never
    /// propagated to the caller.
    pub async fn emit(
        &self,
        owner_email: &str,
        kind: NotificationKind,
        message: String,
        food_id: Option<String>,
        food_title: Option<String>,
        related_user: Option<String>,
    ) -> Option<String> {
        let notification = Notification::new(
            owner_email.to_string(),
            kind,
            message,
            food_id,
            food_title,
            related_user,
        );

        match self.db.create_notification(&notification).await {
            Ok(()) => {
                tracing::debug!("Notification created: {}", notification.message);
                Some(notification.id)
            }
            Err(e) => {
                warn!(
                    "Failed to create {} notification for {}: {}",
                    kind, owner_email, e
                );
                None
            }
        }
    }

    /// List the owner's notifications, newest first
    pub async fn list(
        &self,
        owner_email: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Notification>> {
        self.db.list_notifications(owner_email, limit, offset).await
    }

    pub async fn unread_count(&self, owner_email: &str) -> ApiResult<i64> {
        self.db.count_unread_notifications(owner_email).await
    }

    /// Mark one notification read. Fails with `NotFound` for an unknown id
    /// and `Forbidden` when the notification belongs to someone else.
    pub async fn mark_read(&self, owner_email: &str, id: &str) -> ApiResult<()> {
        let notification = self
            .db
            .get_notification_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;

        if notification.owner_email != owner_email {
            return Err(ApiError::Forbidden(
                "Cannot mark another user's notification as read".to_string(),
            ));
        }

        self.db.mark_notification_read(id).await
    }

    /// Mark all of the owner's unread notifications read, returning how many
    /// were affected
    pub async fn mark_all_read(&self, owner_email: &str) -> ApiResult<u64> {
        self.db.mark_all_notifications_read(owner_email).await
    }

    pub async fn delete(&self, owner_email: &str, id: &str) -> ApiResult<()> {
        let notification = self
            .db
            .get_notification_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;

        if notification.owner_email != owner_email {
            return Err(ApiError::Forbidden(
                "Cannot delete another user's notification".to_string(),
            ));
        }

        self.db.delete_notification(id).await?;
        Ok(())
    }

    pub async fn delete_all(&self, owner_email: &str) -> ApiResult<u64> {
        self.db.delete_all_notifications(owner_email).await
    }

    /// Insert a few sample notifications into the owner's feed (dev tooling)
    pub async fn seed_samples(&self, owner_email: &str) -> ApiResult<usize> {
        let samples = [
            (
                NotificationKind::FoodAdded,
                "You added \"Apple\" to your fridge".to_string(),
            ),
            (
                NotificationKind::FoodLiked,
                "john@example.com liked your \"Banana\"".to_string(),
            ),
            (
                NotificationKind::ExpirySoon,
                "\"Milk\" expires in 2 days.".to_string(),
            ),
        ];

        for (kind, message) in &samples {
            let notification = Notification::new(
                owner_email.to_string(),
                *kind,
                message.clone(),
                None,
                None,
                None,
            );
            self.db.create_notification(&notification).await?;
        }

        Ok(samples.len())
    }
}
