use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, AuthenticatedUser},
    models::Notification,
};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub created_at: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_user: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind.as_str().to_string(),
            message: notification.message,
            created_at: notification.created_at,
            read: notification.read,
            food_id: notification.food_id,
            food_title: notification.food_title,
            related_user: notification.related_user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AffectedCountResponse {
    pub message: String,
    pub count: u64,
}

// API Handlers

/// List notifications for the authenticated user, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResult<impl IntoResponse> {
    if query.limit < 1 || query.limit > 100 {
        return Err(ApiError::BadRequest(
            "Limit must be between 1 and 100".to_string(),
        ));
    }

    if query.offset < 0 {
        return Err(ApiError::BadRequest(
            "Offset must be non-negative".to_string(),
        ));
    }

    let notifications = state
        .notification_service
        .list(&user.email, query.limit, query.offset)
        .await?;

    let total = notifications.len();
    let notifications: Vec<NotificationResponse> = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(NotificationListResponse {
        notifications,
        total,
    }))
}

/// Get unread notification count for the authenticated user
pub async fn get_unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notification_service.unread_count(&user.email).await?;

    Ok(Json(UnreadCountResponse { count }))
}

/// Mark a notification as read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.notification_service.mark_read(&user.email, &id).await?;

    Ok(Json(SuccessResponse {
        message: "Notification marked as read".to_string(),
    }))
}

/// Mark all notifications as read for the authenticated user
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notification_service.mark_all_read(&user.email).await?;

    Ok(Json(AffectedCountResponse {
        message: "All notifications marked as read".to_string(),
        count,
    }))
}

/// Delete a single notification owned by the authenticated user
pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.notification_service.delete(&user.email, &id).await?;

    Ok(Json(SuccessResponse {
        message: "Notification deleted".to_string(),
    }))
}

/// Delete every notification owned by the authenticated user
pub async fn delete_all_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notification_service.delete_all(&user.email).await?;

    Ok(Json(AffectedCountResponse {
        message: "All notifications deleted".to_string(),
        count,
    }))
}

/// Insert sample notifications into the authenticated user's feed
pub async fn seed_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notification_service.seed_samples(&user.email).await?;

    Ok(Json(AffectedCountResponse {
        message: "Sample notifications created".to_string(),
        count: count as u64,
    }))
}
